//! Unit tests for gpss-generator.

use gpss_core::{Fixed, GeneratorId, GpssError, SimRng, Tick, TransactId, UniformSteps};

use crate::{Generator, TransactSequence};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
enum Kind {
    Car,
    Truck,
}

fn fixed(delay: u64) -> Generator<Kind> {
    Generator::new(GeneratorId(0), Kind::Car, Fixed(delay), Tick(0), SimRng::new(0))
}

#[cfg(test)]
mod emission {
    use super::*;

    #[test]
    fn first_emission_at_start_time() {
        let g = Generator::new(GeneratorId(0), Kind::Car, Fixed(10), Tick(20), SimRng::new(0));
        assert_eq!(g.emission_time(), Tick(20));
        assert!(g.is_due(Tick(20)));
        assert!(!g.is_due(Tick(0)));
    }

    #[test]
    fn emit_stamps_clock_plus_delay() {
        let mut g = fixed(10);
        let mut seq = TransactSequence::new();
        let t = g.emit(&Tick(0), &mut seq).unwrap();
        assert_eq!(t.time, Tick(10));
        assert_eq!(t.kind, Kind::Car);
        assert!(!t.has_handler());
        assert_eq!(g.emission_time(), Tick(10), "last generation time follows the transact");
        assert!(g.is_due(Tick(10)));
    }

    #[test]
    fn numbers_are_shared_and_sequential() {
        let mut cars = fixed(10);
        let mut trucks =
            Generator::new(GeneratorId(1), Kind::Truck, Fixed(7), Tick(0), SimRng::new(1));
        let mut seq = TransactSequence::new();
        let a = cars.emit(&Tick(0), &mut seq).unwrap();
        let b = trucks.emit(&Tick(0), &mut seq).unwrap();
        let c = cars.emit(&Tick(10), &mut seq).unwrap();
        assert_eq!([a.id, b.id, c.id], [TransactId(0), TransactId(1), TransactId(2)]);
        assert_eq!(seq.issued(), 3);
        assert_eq!(b.kind, Kind::Truck);
    }

    #[test]
    fn limit_exhausts_generator() {
        let mut g = fixed(10).with_limit(2);
        let mut seq = TransactSequence::new();
        g.emit(&Tick(0), &mut seq).unwrap();
        assert!(!g.is_exhausted());
        g.emit(&Tick(10), &mut seq).unwrap();
        assert!(g.is_exhausted());
        assert!(!g.is_due(Tick(20)));
        assert_eq!(g.emitted(), 2);
    }

    #[test]
    fn sampled_delay_is_reproducible() {
        let make = || {
            Generator::new(
                GeneratorId(0),
                Kind::Car,
                UniformSteps::new(5, 9, 10).unwrap(),
                Tick(0),
                SimRng::for_stream(42, 0),
            )
        };
        let (mut g1, mut g2) = (make(), make());
        let (mut s1, mut s2) = (TransactSequence::new(), TransactSequence::new());
        let mut clock = Tick(0);
        for _ in 0..20 {
            let a = g1.emit(&clock, &mut s1).unwrap();
            let b = g2.emit(&clock, &mut s2).unwrap();
            assert_eq!(a.time, b.time);
            assert!((50..=90).contains(&(a.time - clock)));
            clock = a.time;
        }
        assert_eq!(g1.fixed_delay(), None);
    }
}

#[cfg(test)]
mod numbering {
    use super::*;

    #[test]
    fn sequence_stops_before_invalid_sentinel() {
        let mut seq = TransactSequence::starting_at(u32::MAX - 1);
        assert_eq!(seq.next_id().unwrap(), TransactId(u32::MAX - 1));
        assert!(matches!(seq.next_id(), Err(GpssError::IdsExhausted("transact"))));
        assert!(matches!(seq.next_id(), Err(GpssError::IdsExhausted(_))), "stays exhausted");
        assert_eq!(seq.issued(), u32::MAX);
    }

    #[test]
    fn exhausted_numbers_leave_generator_untouched() {
        let mut g = fixed(10);
        let mut seq = TransactSequence::starting_at(u32::MAX);
        assert!(g.emit(&Tick(0), &mut seq).is_err());
        assert_eq!(g.emitted(), 0);
        assert_eq!(g.emission_time(), Tick(0));
        assert!(g.is_due(Tick(0)));
    }

    #[test]
    fn zero_delay_streak_counts_stalled_emissions() {
        let mut zeros = 0;
        let mut g = Generator::new(
            GeneratorId(0),
            Kind::Car,
            move |_: &mut SimRng| {
                zeros += 1;
                if zeros <= 3 { 0 } else { 5 }
            },
            Tick(0),
            SimRng::new(0),
        );
        let mut seq = TransactSequence::new();
        for n in 1..=3 {
            g.emit(&Tick(0), &mut seq).unwrap();
            assert_eq!(g.zero_delay_streak(), n);
        }
        g.emit(&Tick(0), &mut seq).unwrap();
        assert_eq!(g.zero_delay_streak(), 0);
        assert_eq!(g.emission_time(), Tick(5));
    }
}
