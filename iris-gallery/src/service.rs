use crate::{
    config::ServiceConfig,
    error::Error,
    lenient::lenient_similarity,
    loader::load_image,
    store::{EnrollmentRecord, GalleryStats, GalleryStore, SubjectId},
};
use iris_core::{
    best_match, compare, config::IrisConfig, ComparisonResult, Identification, IrisCode,
    IrisEncoder, PixelBuffer,
};
use std::{
    path::Path,
    sync::{Mutex, MutexGuard},
};

/// Enrollment, 1:N identification and 1:1 verification on top of a
/// [`GalleryStore`].
///
/// Encoding happens outside of the store lock. Enrollment holds the lock for
/// the whole duplicate check and insert, so two samples of the same iris can
/// never race into two identities.
pub struct IrisService {
    store: Mutex<GalleryStore>,
    encoder: IrisEncoder,
    threshold: f64,
}

impl IrisService {
    pub fn new(store: GalleryStore, config: &IrisConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            store: Mutex::new(store),
            encoder: IrisEncoder::new(config.encoder.clone())?,
            threshold: config.matcher.threshold,
        })
    }

    pub fn open(config: &ServiceConfig) -> Result<Self, Error> {
        let store = GalleryStore::open(&config.database)?;
        Self::new(store, &config.iris_config())
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    fn store(&self) -> Result<MutexGuard<'_, GalleryStore>, Error> {
        self.store
            .lock()
            .map_err(|_| Error::from("gallery store lock poisoned"))
    }

    pub fn encode<B: PixelBuffer + ?Sized>(&self, image: &B) -> Result<IrisCode, Error> {
        let code = self.encoder.encode(image)?;
        tracing::debug!(
            bits = code.len(),
            ones = code.count_ones(),
            "encoded iris image"
        );
        Ok(code)
    }

    pub fn encode_file(&self, path: &Path) -> Result<IrisCode, Error> {
        self.encode(&load_image(path)?)
    }

    pub fn enroll<B: PixelBuffer + ?Sized>(
        &self,
        subject: SubjectId,
        image: &B,
        image_path: Option<&str>,
    ) -> Result<EnrollmentRecord, Error> {
        let code = self.encode(image)?;
        self.enroll_code(subject, &code, image_path)
    }

    pub fn enroll_file(&self, subject: SubjectId, path: &Path) -> Result<EnrollmentRecord, Error> {
        let image = load_image(path)?;
        let image_path = path.to_string_lossy();
        self.enroll(subject, &image, Some(&*image_path))
    }

    pub fn enroll_code(
        &self,
        subject: SubjectId,
        code: &IrisCode,
        image_path: Option<&str>,
    ) -> Result<EnrollmentRecord, Error> {
        let res = self.store()?.enroll(subject, code, image_path);
        match &res {
            Ok(record) => tracing::info!(subject, id = record.id, "enrolled iris"),
            Err(e) => tracing::warn!(subject, "enrollment rejected: {e}"),
        }
        res
    }

    pub fn identify<B: PixelBuffer + ?Sized>(
        &self,
        image: &B,
    ) -> Result<Identification<SubjectId>, Error> {
        let probe = self.encode(image)?;
        self.identify_code(&probe)
    }

    pub fn identify_file(&self, path: &Path) -> Result<Identification<SubjectId>, Error> {
        self.identify(&load_image(path)?)
    }

    /// Scans the whole gallery. Stored codes of another length go through
    /// [`lenient_similarity`] instead of failing the scan.
    pub fn identify_code(&self, probe: &IrisCode) -> Result<Identification<SubjectId>, Error> {
        let gallery = self.store()?.gallery()?;
        if gallery.is_empty() {
            return Err(Error::EmptyGallery);
        }

        let identification = best_match(&gallery, probe, self.threshold, |probe, stored| {
            let score = lenient_similarity(probe, stored)?;
            tracing::debug!(score, "compared probe with enrolled iris");
            Ok(score)
        })?;

        match &identification.candidate {
            Some(candidate) => tracing::info!(
                subject = candidate.subject,
                score = candidate.score,
                "iris identified"
            ),
            None => tracing::info!(
                best_score = identification.best_score,
                gallery_size = gallery.len(),
                "iris not recognized"
            ),
        }
        Ok(identification)
    }

    pub fn verify<B: PixelBuffer + ?Sized>(
        &self,
        subject: SubjectId,
        image: &B,
    ) -> Result<ComparisonResult, Error> {
        let probe = self.encode(image)?;
        self.verify_code(subject, &probe)
    }

    pub fn verify_file(&self, subject: SubjectId, path: &Path) -> Result<ComparisonResult, Error> {
        self.verify(subject, &load_image(path)?)
    }

    /// 1:1 comparison with the strict matcher.
    pub fn verify_code(
        &self,
        subject: SubjectId,
        probe: &IrisCode,
    ) -> Result<ComparisonResult, Error> {
        let record = self
            .store()?
            .record(subject)?
            .ok_or(Error::UnknownSubject(subject))?;
        let result = compare(probe, &record.code, self.threshold)?;
        tracing::info!(
            subject,
            similarity = result.similarity,
            decision = %result.decision,
            "verified iris"
        );
        Ok(result)
    }

    pub fn records(&self) -> Result<Vec<EnrollmentRecord>, Error> {
        self.store()?.records()
    }

    pub fn record(&self, subject: SubjectId) -> Result<Option<EnrollmentRecord>, Error> {
        self.store()?.record(subject)
    }

    pub fn stats(&self) -> Result<GalleryStats, Error> {
        self.store()?.stats()
    }
}
