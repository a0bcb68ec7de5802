mod encoder_test {
    use crate::{
        config::EncoderConfig, gray_from_raw, preprocess::preprocess,
        tests::iris_config::iris_config::synthetic_iris, Error, IrisEncoder, PixelBuffer,
    };
    use image::{DynamicImage, GrayImage, Luma};

    fn small_grid() -> IrisEncoder {
        IrisEncoder::new(EncoderConfig {
            rings: 2,
            sectors: 2,
            code_length: 4,
            ..Default::default()
        })
        .unwrap()
    }

    fn dark_image_with(bright: &[(u32, u32)]) -> GrayImage {
        let mut image = GrayImage::new(10, 10);
        for &(x, y) in bright {
            image.put_pixel(x, y, Luma([200]));
        }
        image
    }

    #[test]
    fn code_has_configured_length() {
        let encoder = IrisEncoder::new(EncoderConfig::default()).unwrap();
        for (width, height) in [(1, 1), (3, 500), (64, 64), (320, 240)] {
            let code = encoder.encode(&synthetic_iris(width, height)).unwrap();
            assert_eq!(code.len(), 512);
            let text = code.to_string();
            assert_eq!(text.len(), 512);
            assert!(text.chars().all(|c| c == '0' || c == '1'));
        }

        let encoder = IrisEncoder::new(EncoderConfig {
            code_length: 256,
            ..Default::default()
        })
        .unwrap();
        let code = encoder.encode(&synthetic_iris(128, 96)).unwrap();
        assert_eq!(code.len(), 256);
    }

    #[test]
    fn encode_is_deterministic() {
        let encoder = IrisEncoder::new(EncoderConfig::default()).unwrap();
        let image = synthetic_iris(200, 150);
        let first = encoder.encode(&image).unwrap();
        for _ in 0..3 {
            assert_eq!(encoder.encode(&image).unwrap(), first);
        }
        // a textured image must not collapse to a constant code
        assert_ne!(first.count_ones(), 0);
        assert_ne!(first.count_ones(), first.len());
    }

    #[test]
    fn encode_does_not_touch_input() {
        let encoder = IrisEncoder::new(EncoderConfig::default()).unwrap();
        let image = synthetic_iris(64, 48);
        let copy = image.clone();
        encoder.encode(&image).unwrap();
        assert_eq!(image, copy);
    }

    #[test]
    fn empty_image_is_load_error() {
        let encoder = IrisEncoder::new(EncoderConfig::default()).unwrap();
        assert!(matches!(
            encoder.encode(&GrayImage::new(0, 0)),
            Err(Error::LoadError(_))
        ));
        assert!(matches!(
            encoder.encode(&GrayImage::new(10, 0)),
            Err(Error::LoadError(_))
        ));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let res = IrisEncoder::new(EncoderConfig {
            rings: 4,
            sectors: 4,
            code_length: 17,
            ..Default::default()
        });
        assert!(matches!(res, Err(Error::ConfigError(_))));
    }

    #[test]
    fn samples_polar_grid() {
        // rings 2, sectors 2 on a 10x10 image: bit 0 samples (7, 5), bit 1
        // (9, 5) after clamping, bit 2 (2, 5) and bit 3 (0, 5)
        let encoder = small_grid();
        let code = encoder.sample(&dark_image_with(&[(7, 5), (0, 5)]));
        assert_eq!(code.to_string(), "1001");
        let code = encoder.sample(&dark_image_with(&[(2, 5)]));
        assert_eq!(code.to_string(), "0010");
    }

    #[test]
    fn outer_ring_is_clamped_not_wrapped() {
        let encoder = small_grid();
        // x = 10 clamps to the last column
        let code = encoder.sample(&dark_image_with(&[(9, 5)]));
        assert_eq!(code.to_string(), "0100");
        // wrapping would have sampled the first column
        let code = encoder.sample(&dark_image_with(&[(0, 4), (0, 6), (1, 5)]));
        assert_eq!(code.to_string(), "0000");
    }

    #[test]
    fn flat_image_gives_zero_code() {
        let encoder = IrisEncoder::new(EncoderConfig::default()).unwrap();
        let flat = GrayImage::from_pixel(50, 40, Luma([128]));
        let code = encoder.encode(&flat).unwrap();
        assert_eq!(code.count_ones(), 0);
    }

    #[test]
    fn sampling_ignores_brightness_shift() {
        let encoder = IrisEncoder::new(EncoderConfig::default()).unwrap();
        let image = synthetic_iris(120, 90);
        let brighter = GrayImage::from_fn(120, 90, |x, y| Luma([image.get_pixel(x, y)[0] + 40]));
        assert_eq!(encoder.sample(&image), encoder.sample(&brighter));
    }

    #[test]
    fn dynamic_image_is_read_as_luma() {
        let encoder = IrisEncoder::new(EncoderConfig::default()).unwrap();
        let gray = synthetic_iris(80, 60);
        let dynamic = DynamicImage::ImageLuma8(gray.clone());
        assert_eq!(PixelBuffer::width(&dynamic), 80);
        assert_eq!(PixelBuffer::get_pixel(&dynamic, 3, 4), gray.get_pixel(3, 4)[0]);
        assert_eq!(
            encoder.encode(&dynamic).unwrap(),
            encoder.encode(&gray).unwrap()
        );
    }

    #[test]
    fn preprocess_keeps_dimensions() {
        let image = synthetic_iris(33, 21);
        let blurred = preprocess(&image, 1.5).unwrap();
        assert_eq!(blurred.dimensions(), (33, 21));
        assert_ne!(blurred, image);
    }

    #[test]
    fn preprocess_rejects_bad_sigma() {
        let image = GrayImage::from_pixel(4, 4, Luma([1]));
        for sigma in [0., -1., f32::NAN, f32::INFINITY] {
            assert!(matches!(
                preprocess(&image, sigma),
                Err(Error::ConfigError(_))
            ));
        }
    }

    #[test]
    fn raw_buffers() {
        let image = gray_from_raw(4, 2, vec![0, 1, 2, 3, 4, 5, 6, 7]).unwrap();
        assert_eq!(PixelBuffer::get_pixel(&image, 1, 1), 5);
        assert!(matches!(
            gray_from_raw(4, 2, vec![0; 7]),
            Err(Error::LoadError(_))
        ));
    }
}
