use crate::{code::IrisCode, error::Error, matcher::similarity};

#[derive(Clone, Debug, PartialEq)]
pub struct GalleryEntry<Id> {
    pub subject: Id,
    pub code: IrisCode,
}

/// A gallery entry that reached the threshold.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate<Id> {
    pub subject: Id,
    pub score: f64,
}

/// Outcome of a 1:N search. `best_score` is the highest similarity seen
/// during the scan, also when no entry reached the threshold.
#[derive(Clone, Debug, PartialEq)]
pub struct Identification<Id> {
    pub candidate: Option<Candidate<Id>>,
    pub best_score: f64,
}

impl<Id> Identification<Id> {
    pub fn is_match(&self) -> bool {
        self.candidate.is_some()
    }
}

/// 1:N search over enrolled codes.
pub trait GallerySearch {
    type Subject;

    /// Finds the best entry with similarity at or above `threshold`.
    fn identify(
        &self,
        probe: &IrisCode,
        threshold: f64,
    ) -> Result<Identification<Self::Subject>, Error>;

    /// True iff some entry holds exactly `code`.
    fn is_duplicate(&self, code: &IrisCode) -> bool;
}

pub fn identify<G: GallerySearch + ?Sized>(
    probe: &IrisCode,
    gallery: &G,
    threshold: f64,
) -> Result<Identification<G::Subject>, Error> {
    gallery.identify(probe, threshold)
}

pub fn is_duplicate<G: GallerySearch + ?Sized>(code: &IrisCode, gallery: &G) -> bool {
    gallery.is_duplicate(code)
}

/// Linear scan in iteration order with a pluggable scoring function.
///
/// An entry only replaces the current candidate if it scores strictly higher,
/// so the earliest entry wins among equal scores.
pub fn best_match<'a, Id, I, F>(
    entries: I,
    probe: &IrisCode,
    threshold: f64,
    mut score: F,
) -> Result<Identification<Id>, Error>
where
    Id: Clone + 'a,
    I: IntoIterator<Item = &'a GalleryEntry<Id>>,
    F: FnMut(&IrisCode, &IrisCode) -> Result<f64, Error>,
{
    let mut candidate_score = 0.;
    let mut candidate = None;
    let mut observed = 0f64;

    for entry in entries {
        let value = score(probe, &entry.code)?;
        observed = observed.max(value);
        if value > candidate_score && value >= threshold {
            candidate_score = value;
            candidate = Some(&entry.subject);
        }
    }

    Ok(Identification {
        candidate: candidate.map(|subject| Candidate {
            subject: subject.clone(),
            score: candidate_score,
        }),
        best_score: observed,
    })
}

/// Enrolled (subject, code) pairs in insertion order.
///
/// [`Gallery::enroll`] keeps one code per subject and rejects exact
/// duplicates. Entries handed to [`Gallery::from_entries`] are taken as-is.
#[derive(Clone, Debug, PartialEq)]
pub struct Gallery<Id> {
    entries: Vec<GalleryEntry<Id>>,
}

impl<Id> Default for Gallery<Id> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<Id> Gallery<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<GalleryEntry<Id>>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GalleryEntry<Id>> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> Vec<GalleryEntry<Id>> {
        self.entries
    }
}

impl<Id: PartialEq> Gallery<Id> {
    pub fn code_of(&self, subject: &Id) -> Option<&IrisCode> {
        self.entries
            .iter()
            .find(|entry| entry.subject == *subject)
            .map(|entry| &entry.code)
    }

    /// Admits a new pair after the uniqueness checks. Nothing is overwritten.
    pub fn enroll(&mut self, subject: Id, code: IrisCode) -> Result<(), Error> {
        if self.code_of(&subject).is_some() {
            return Err(Error::DuplicateSubjectError);
        }
        if self.entries.iter().any(|entry| entry.code == code) {
            return Err(Error::DuplicateIrisError);
        }
        self.entries.push(GalleryEntry { subject, code });
        Ok(())
    }
}

impl<Id: Clone> GallerySearch for Gallery<Id> {
    type Subject = Id;

    fn identify(&self, probe: &IrisCode, threshold: f64) -> Result<Identification<Id>, Error> {
        best_match(&self.entries, probe, threshold, similarity)
    }

    fn is_duplicate(&self, code: &IrisCode) -> bool {
        self.entries.iter().any(|entry| entry.code == *code)
    }
}

impl<'a, Id> IntoIterator for &'a Gallery<Id> {
    type Item = &'a GalleryEntry<Id>;
    type IntoIter = std::slice::Iter<'a, GalleryEntry<Id>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
