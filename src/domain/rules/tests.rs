// Unit tests for selection and timing rules

#[cfg(test)]
mod tests {
    use crate::domain::model::*;
    use crate::domain::rules::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;
    use std::time::Duration;

    fn audio(names: &[&str]) -> Vec<Asset> {
        names
            .iter()
            .map(|name| Asset::new(format!("/music/{}", name), MediaKind::Audio).unwrap())
            .collect()
    }

    #[test]
    fn test_unique_pool_never_repeats_before_exhaustion() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut pool = UniquePool::shuffled(audio(&["a.wav", "b.wav", "c.wav", "d.wav"]), &mut rng);

        let mut seen = HashSet::new();
        while let Draw::Next(asset) = pool.next(&mut rng) {
            assert!(seen.insert(asset.path.clone()), "repeated {}", asset);
            pool.mark_used(&asset);
        }

        assert_eq!(seen.len(), 4);
        assert_eq!(pool.used_count(), 4);
    }

    #[test]
    fn test_unique_pool_order_is_seed_deterministic() {
        let names = ["a.wav", "b.wav", "c.wav", "d.wav", "e.wav"];
        let order = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut pool = UniquePool::shuffled(audio(&names), &mut rng);
            let mut out = Vec::new();
            while let Draw::Next(asset) = pool.next(&mut rng) {
                out.push(asset.file_name());
            }
            out
        };

        assert_eq!(order(42), order(42));
    }

    #[test]
    fn test_refill_skips_used_assets() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut pool = UniquePool::shuffled(audio(&["a.wav", "b.wav"]), &mut rng);
        while let Draw::Next(asset) = pool.next(&mut rng) {
            pool.mark_used(&asset);
        }
        assert_eq!(pool.next(&mut rng), Draw::Exhausted);

        let pending = pool.refill(audio(&["a.wav", "b.wav", "new.wav"]), &mut rng);
        assert_eq!(pending, 1);
        let next = pool.next(&mut rng).into_option().unwrap();
        assert_eq!(next.file_name(), "new.wav");
    }

    #[test]
    fn test_refill_with_only_used_assets_stays_exhausted() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut pool = UniquePool::shuffled(audio(&["a.wav"]), &mut rng);
        let only = pool.next(&mut rng).into_option().unwrap();
        pool.mark_used(&only);

        assert_eq!(pool.refill(audio(&["a.wav"]), &mut rng), 0);
        assert_eq!(pool.next(&mut rng), Draw::Exhausted);
    }

    #[test]
    fn test_unique_pool_skips_assets_marked_used_while_pending() {
        let mut rng = StdRng::seed_from_u64(9);
        let assets = audio(&["a.wav", "b.wav"]);
        let mut pool = UniquePool::shuffled(assets.clone(), &mut rng);
        pool.mark_used(&assets[0]);
        pool.mark_used(&assets[1]);

        assert_eq!(pool.next(&mut rng), Draw::Exhausted);
    }

    #[test]
    fn test_replacement_pool_never_exhausts() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut pool = ReplacementPool::new(audio(&["only.mp4"])).unwrap();

        for _ in 0..20 {
            let asset = pool.next(&mut rng).into_option().unwrap();
            assert_eq!(asset.file_name(), "only.mp4");
        }
    }

    #[test]
    fn test_replacement_pool_rejects_empty_list() {
        assert!(ReplacementPool::new(Vec::new()).is_none());
    }

    #[test]
    fn test_accumulator_stops_at_target() {
        let mut acc = DurationAccumulator::new(Duration::from_secs(300));
        assert!(acc.should_continue());

        acc.add(Duration::from_secs(600));
        assert!(!acc.should_continue());
        assert_eq!(acc.remaining(), Duration::ZERO);
    }

    #[test]
    fn test_accumulator_is_monotonic() {
        let mut acc = DurationAccumulator::new(Duration::from_secs(10));
        let mut last = acc.elapsed();
        for secs in [0, 3, 0, 4] {
            acc.add(Duration::from_secs(secs));
            assert!(acc.elapsed() >= last);
            last = acc.elapsed();
        }
        assert_eq!(acc.elapsed(), Duration::from_secs(7));
        assert!(acc.should_continue());
    }

    #[test]
    fn test_zero_target_never_runs() {
        let acc = DurationAccumulator::new(Duration::ZERO);
        assert!(!acc.should_continue());
    }

    #[test]
    fn test_accounted_growth_follows_mode() {
        let segment = TimedSegment::new(
            Asset::new("a.wav", MediaKind::Audio).unwrap(),
            Duration::from_secs(60),
            None,
        )
        .unwrap();
        let net = Duration::from_secs(57);

        assert_eq!(
            accounted_growth(DurationAccounting::Nominal, &segment, net),
            Duration::from_secs(60)
        );
        assert_eq!(accounted_growth(DurationAccounting::Mixed, &segment, net), net);
    }
}
