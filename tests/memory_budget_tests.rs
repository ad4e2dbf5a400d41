//! Arena budget and configuration tests

use reflinq::prelude::*;
use reflinq_mem::Error as MemError;

#[test]
fn test_arena_acquire_release() {
    let arena = Arena::new(1024 * 1024, AllocatorKind::Temp); // 1MB
    assert_eq!(arena.used_bytes(), 0);

    let buf = arena.acquire::<u32>(1024).expect("Acquire failed");
    assert_eq!(buf.len(), 1024);
    assert_eq!(buf.accounted_bytes(), 4096);
    assert_eq!(arena.used_bytes(), 4096);

    buf.release();
    assert_eq!(arena.used_bytes(), 0);
}

#[test]
fn test_arena_exhaustion() {
    let arena = Arena::new(500, AllocatorKind::Temp);
    let held = arena.acquire::<u8>(400).expect("First acquire failed");

    let err = arena.acquire::<u8>(200).unwrap_err();
    assert!(matches!(
        err,
        MemError::BudgetExceeded {
            requested: 200,
            capacity: 500,
            used: 400,
            ..
        }
    ));
    assert_eq!(arena.used_bytes(), 400);

    drop(held);
    assert!(arena.acquire::<u8>(200).is_ok());
}

#[test]
fn test_clones_share_one_budget() {
    let arena = Arena::new(64, AllocatorKind::Persistent);
    let other = arena.clone();
    let _buf = other.acquire::<u64>(4).unwrap();
    assert_eq!(arena.used_bytes(), 32);
    assert_eq!(arena.kind(), AllocatorKind::Persistent);
}

#[test]
fn test_mem_error_maps_into_core() {
    let arena = Arena::new(1, AllocatorKind::Temp);
    let err: Error = arena.acquire::<u64>(1).unwrap_err().into();
    assert!(matches!(err, Error::Memory(_)));
}

#[test]
fn test_concat_of_generators_releases_both_slots() {
    let arena = Arena::new(1024, AllocatorKind::Temp);
    let mut both = Generator::range(0u64, 3, arena.clone())
        .concat(Generator::repeat(7u64, 3, arena.clone()));
    {
        let mut cursor = both.cursor();
        assert!(cursor.advance());
        assert_eq!(arena.used_bytes(), 16);
    }
    assert_eq!(arena.used_bytes(), 0);
    assert_eq!(arena.peak_bytes(), 16);
}

#[test]
fn test_config_json_round_trip() {
    let cfg = QueryConfig {
        arena_capacity_bytes: 4096,
        default_allocator: AllocatorKind::TempJob,
        materialize_initial_capacity: 2,
    };
    let json = serde_json::to_string(&cfg).unwrap();
    assert!(json.contains("\"temp_job\""));
    let back = QueryConfig::from_json(&json).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn test_arena_from_config() {
    let cfg = QueryConfig::from_json(
        r#"{"arena_capacity_bytes": 64, "materialize_initial_capacity": 2}"#,
    )
    .unwrap();
    let arena = Arena::from_config(&cfg).unwrap();
    assert_eq!(arena.capacity_bytes(), 64);
    assert_eq!(arena.kind(), AllocatorKind::Temp);
    assert_eq!(arena.materialize_initial_capacity(), 2);

    // No fast count: starts at 2 elements and doubles within the budget.
    let mut data = [1u64, 2, 3, 4, 5, 6, 7, 8, 9];
    let mut odd = Source::new(&mut data).filter(|x: &u64| x % 2 == 1);
    let buf = odd.to_owned_buffer(&arena).unwrap();
    assert_eq!(&*buf, &[1, 3, 5, 7, 9]);
    assert_eq!(buf.accounted_bytes(), 64);
}

#[test]
fn test_invalid_config_rejected() {
    assert!(matches!(
        QueryConfig::from_json(r#"{"arena_capacity_bytes": 0}"#),
        Err(Error::Config(_))
    ));
    assert!(matches!(
        QueryConfig::from_json(r#"{"default_allocator": "heap"}"#),
        Err(Error::Config(_))
    ));
    assert!("temp_job".parse::<AllocatorKind>().is_ok());
    assert!("stack".parse::<AllocatorKind>().is_err());
}
