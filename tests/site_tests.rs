mod common;

#[cfg(test)]
pub mod site_tests {
    use std::sync::Arc;

    use super::common::*;

    use pontonovo::client::*;
    use pontonovo::models::*;
    use pontonovo::site::*;

    #[test]
    fn test_rotation_index_is_tick_count_mod_len() {
        for n in 1..=5 {
            let banners: Vec<_> = (0..n)
                .map(|i| get_seed_banner(&format!("https://cdn/{i}.jpg"), i))
                .collect();

            let mut ticking = Carousel::new(&banners);
            for tick in 0..23u64 {
                let expected = (tick % n as u64) as usize;
                assert_eq!(ticking.index(), expected);
                assert_eq!(Carousel::new(&banners).at_tick(tick).index(), expected);
                ticking.tick();
            }
        }
    }

    #[test]
    fn test_no_banners_rotates_fallback_images() {
        let mut carousel = Carousel::new(&[]);
        assert!(carousel.is_fallback());
        assert_eq!(carousel.images(), FALLBACK_BANNERS);

        for _ in 0..4 {
            carousel.tick();
        }
        assert_eq!(carousel.current(), FALLBACK_BANNERS[1]);
    }

    #[test]
    fn test_ten_activations_navigate_and_reset() {
        let mut gesture = TapGesture::new();
        for i in 1..ADMIN_TAP_THRESHOLD {
            assert_eq!(gesture.activate(), GestureOutcome::Pending(i));
        }
        assert_eq!(gesture.activate(), GestureOutcome::Navigate);
        assert_eq!(gesture.count(), 0);
    }

    #[test]
    fn test_nine_activations_do_not_navigate() {
        let mut gesture = TapGesture::new();
        let outcomes: Vec<_> = (0..9).map(|_| gesture.activate()).collect();
        assert!(!outcomes.contains(&GestureOutcome::Navigate));
        assert_eq!(gesture.count(), 9);
    }

    #[tokio::test]
    async fn test_logo_falls_back_to_default() {
        let pages = SitePages::new(Arc::new(MemoryBackend::new()));
        assert_eq!(pages.logo().await, DEFAULT_LOGO);

        let pages = SitePages::new(Arc::new(FailingBackend));
        assert_eq!(pages.logo().await, DEFAULT_LOGO);
    }

    #[tokio::test]
    async fn test_logo_ignores_other_settings() {
        let backend = Arc::new(MemoryBackend::new());
        let settings = EntityClient::<Setting>::new(backend.clone());
        settings.create(&Setting::new("theme", "red")).await.unwrap();
        settings
            .create(&Setting::logo("https://cdn/logo.png"))
            .await
            .unwrap();

        let pages = SitePages::new(backend);
        assert_eq!(pages.logo().await, "https://cdn/logo.png");
    }

    #[tokio::test]
    async fn test_pages_degrade_to_empty_on_failure() {
        let pages = SitePages::new(Arc::new(FailingBackend));
        assert!(pages.stores().await.is_empty());
        assert!(pages.promotions().await.is_empty());
        assert!(pages.own_brands().await.is_empty());
        assert!(pages.home().await.is_fallback());
    }

    #[tokio::test]
    async fn test_own_brands_are_listed_by_order() {
        let backend = Arc::new(MemoryBackend::new());
        let brands = EntityClient::<OwnBrand>::new(backend.clone());
        for (name, order) in [("Casa", 2), ("Bom Preço", 0), ("Fresco", 1)] {
            brands.create(&get_seed_brand(name, order)).await.unwrap();
        }

        let pages = SitePages::new(backend);
        let names: Vec<_> = pages.own_brands().await.into_iter().map(|b| b.name).collect();
        assert_eq!(names, ["Bom Preço", "Fresco", "Casa"]);
    }
}
