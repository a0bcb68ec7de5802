mod service_test {
    use crate::{
        service::IrisService,
        store::GalleryStore,
        tests::gallery_config::gallery_config::{get_service, noise_image, random_code},
        Error,
    };
    use image::{GrayImage, Luma};
    use iris_core::{config::IrisConfig, Decision};
    use std::{sync::Arc, thread};

    #[test]
    fn enroll_then_identify() {
        let service = get_service();
        for subject in 0..5 {
            service
                .enroll(subject, &noise_image(subject as u64), None)
                .unwrap();
        }

        let res = service.identify(&noise_image(3)).unwrap();
        let candidate = res.candidate.unwrap();
        assert_eq!(candidate.subject, 3);
        assert_eq!(candidate.score, 1.0);
        assert_eq!(res.best_score, 1.0);
    }

    #[test]
    fn stranger_is_not_identified() {
        let service = get_service();
        for subject in 0..5 {
            service
                .enroll(subject, &noise_image(subject as u64), None)
                .unwrap();
        }

        let res = service.identify(&noise_image(100)).unwrap();
        assert!(res.candidate.is_none());
        assert!(res.best_score > 0. && res.best_score < service.threshold());
    }

    #[test]
    fn identify_needs_enrolled_irises() {
        let service = get_service();
        let res = service.identify(&noise_image(1));
        assert!(matches!(res, Err(Error::EmptyGallery)));
    }

    #[test]
    fn same_iris_cannot_be_enrolled_twice() {
        let service = get_service();
        let image = noise_image(7);
        service.enroll(1, &image, None).unwrap();

        let err = service.enroll(2, &image, None).unwrap_err();
        assert!(err.is_duplicate_iris());
        assert_eq!(service.stats().unwrap().total_records, 1);
        assert!(service.record(2).unwrap().is_none());
    }

    #[test]
    fn concurrent_enrollment_of_one_iris() {
        let service = Arc::new(get_service());
        let image = Arc::new(noise_image(21));

        let handles = (0..8)
            .map(|subject| {
                let service = Arc::clone(&service);
                let image = Arc::clone(&image);
                thread::spawn(move || service.enroll(subject, image.as_ref(), None))
            })
            .collect::<Vec<_>>();

        let results = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect::<Vec<_>>();

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(Error::is_duplicate_iris));
        assert_eq!(service.records().unwrap().len(), 1);
    }

    #[test]
    fn verify_against_subject() {
        let service = get_service();
        service.enroll(1, &noise_image(1), None).unwrap();
        service.enroll(2, &noise_image(2), None).unwrap();

        let same = service.verify(1, &noise_image(1)).unwrap();
        assert_eq!(same.similarity, 1.0);
        assert_eq!(same.decision, Decision::Match);

        let other = service.verify(1, &noise_image(2)).unwrap();
        assert_eq!(other.decision, Decision::NoMatch);
        assert!(other.similarity < service.threshold());

        let res = service.verify(3, &noise_image(3));
        assert!(matches!(res, Err(Error::UnknownSubject(3))));
    }

    #[test]
    fn verify_is_strict_about_length() {
        let mut store = GalleryStore::open_in_memory().unwrap();
        store.enroll(9, &random_code(256, 9), None).unwrap();
        let service = IrisService::new(store, &IrisConfig::default()).unwrap();

        let res = service.verify(9, &noise_image(9));
        assert!(matches!(
            res,
            Err(Error::IrisError(iris_core::Error::LengthMismatch {
                left: 512,
                right: 256
            }))
        ));
    }

    #[test]
    fn identify_tolerates_mixed_lengths() {
        let mut store = GalleryStore::open_in_memory().unwrap();
        store.enroll(9, &random_code(256, 9), None).unwrap();
        let service = IrisService::new(store, &IrisConfig::default()).unwrap();
        service.enroll(1, &noise_image(1), None).unwrap();

        let res = service.identify(&noise_image(1)).unwrap();
        assert_eq!(res.candidate.unwrap().subject, 1);

        let res = service.identify(&noise_image(2)).unwrap();
        assert!(res.candidate.is_none());
    }

    #[test]
    fn empty_image_is_rejected() {
        let service = get_service();
        let res = service.enroll(1, &GrayImage::new(0, 0), None);
        assert!(matches!(
            res,
            Err(Error::IrisError(iris_core::Error::LoadError(_)))
        ));
        assert_eq!(service.stats().unwrap().total_records, 0);
    }

    #[test]
    fn files_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let enrolled = dir.path().join("enrolled.png");
        noise_image(5).save(&enrolled).unwrap();
        let garbage = dir.path().join("garbage.png");
        std::fs::write(&garbage, b"not an image").unwrap();

        let service = get_service();
        assert_eq!(
            service.encode_file(&enrolled).unwrap(),
            service.encode(&noise_image(5)).unwrap()
        );
        let record = service.enroll_file(5, &enrolled).unwrap();
        assert_eq!(
            record.image_path,
            Some(enrolled.to_string_lossy().into_owned())
        );

        let res = service.identify_file(&enrolled).unwrap();
        assert_eq!(res.candidate.unwrap().subject, 5);
        let res = service.verify_file(5, &enrolled).unwrap();
        assert!(res.decision.is_match());

        let res = service.enroll_file(6, &garbage);
        assert!(matches!(
            res,
            Err(Error::IrisError(iris_core::Error::LoadError(_)))
        ));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let store = GalleryStore::open_in_memory().unwrap();
        let mut config = IrisConfig::default();
        config.matcher.threshold = 2.;
        assert!(IrisService::new(store, &config).is_err());
    }

    #[test]
    fn flat_images_collide() {
        // flat images all encode to the zero code
        let service = get_service();
        service
            .enroll(1, &GrayImage::from_pixel(40, 40, Luma([10])), None)
            .unwrap();
        let err = service
            .enroll(2, &GrayImage::from_pixel(40, 40, Luma([240])), None)
            .unwrap_err();
        assert!(err.is_duplicate_iris());
    }
}
