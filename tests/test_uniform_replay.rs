use anyhow::Result;
use flashback::{
    error::ReplayError, PaddedVec, ReplayBufferBase, UniformReplay, UniformReplayConfig,
    UniformReplayState,
};

const BATCH_SIZE: usize = 10000;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn frequency(batch: &[i32], item: i32) -> f64 {
    batch.iter().filter(|x| **x == item).count() as f64 / batch.len() as f64
}

#[test]
fn overfilled_buffer_retains_the_newest_items() -> Result<()> {
    init();
    let buffer = UniformReplay::new(3)?;
    let mut state = buffer.init(&0)?;
    for x in 0..6 {
        state = buffer.add(state, &x)?;
    }
    assert_eq!(buffer.size(&state), 3);

    let batch = buffer.sample(&state, 1337, BATCH_SIZE)?;
    assert_eq!(batch.len(), BATCH_SIZE);
    assert!(batch.iter().all(|x| (3..6).contains(x)));
    for item in 3..6 {
        let p = frequency(&batch, item);
        assert!((p - 1.0 / 3.0).abs() < 0.025, "item {}: {}", item, p);
    }
    Ok(())
}

#[test]
fn sampling_is_uniform_over_a_full_buffer() -> Result<()> {
    init();
    let buffer = UniformReplay::new(100)?;
    let mut state = buffer.init(&0)?;
    for x in 0..100 {
        state = buffer.add(state, &x)?;
    }

    let batch = buffer.sample(&state, 42, BATCH_SIZE)?;
    let mut counts = vec![0usize; 100];
    for x in &batch {
        counts[*x as usize] += 1;
    }
    for (item, count) in counts.iter().enumerate() {
        assert!(
            (50..=150).contains(count),
            "item {} drawn {} times",
            item,
            count
        );
    }
    Ok(())
}

#[test]
fn states_fork_without_interference() -> Result<()> {
    init();
    let buffer = UniformReplay::new(8)?;
    let mut state = buffer.init(&0)?;
    for x in 1..=3 {
        state = buffer.add(state, &x)?;
    }

    let fork_a = buffer.add(state.clone(), &10)?;
    let fork_b = buffer.add(state.clone(), &20)?;

    assert_eq!(buffer.size(&state), 3);
    assert_eq!(buffer.size(&fork_a), 4);
    assert_eq!(buffer.size(&fork_b), 4);

    let batch_a = buffer.sample(&fork_a, 7, 256)?;
    assert!(batch_a.contains(&10));
    assert!(!batch_a.contains(&20));

    let batch_b = buffer.sample(&fork_b, 7, 256)?;
    assert!(batch_b.contains(&20));
    assert!(!batch_b.contains(&10));
    Ok(())
}

#[test]
fn identically_built_states_sample_identically() -> Result<()> {
    init();
    fn build(buffer: &UniformReplay<f32>) -> Result<UniformReplayState<f32>> {
        let mut state = buffer.init(&0.0)?;
        for x in 0..6 {
            state = buffer.add(state, &(x as f32))?;
        }
        Ok(state)
    }

    let buffer = UniformReplay::new(4)?;
    let a = build(&buffer)?;
    let b = build(&buffer)?;
    assert_eq!(a, b);
    assert_eq!(buffer.sample(&a, 5, 32)?, buffer.sample(&b, 5, 32)?);
    assert_ne!(buffer.sample(&a, 5, 32)?, buffer.sample(&a, 6, 32)?);
    Ok(())
}

#[test]
fn padded_items_keep_their_width_through_the_buffer() -> Result<()> {
    init();
    let buffer = UniformReplay::new(4)?;
    let template = PaddedVec::padded(&[0.0], 3)?;
    let mut state = buffer.init(&template)?;
    for values in &[vec![1.0], vec![2.0, 2.0], vec![3.0, 3.0, 3.0]] {
        state = buffer.add(state, &PaddedVec::padded(values, 3)?)?;
    }

    let batch = buffer.sample(&state, 9, 16)?;
    assert!(batch.iter().all(|item| item.width() == 3));

    // A four-wide item does not fit the shape established at init.
    let wide = PaddedVec::from(vec![0.0; 4]);
    let err = buffer.add(state, &wide).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ReplayError>(),
        Some(ReplayError::ShapeMismatch { .. })
    ));
    Ok(())
}

#[test]
fn config_built_buffer_runs_end_to_end() -> Result<()> {
    init();
    let config = UniformReplayConfig::default().capacity(50);
    let buffer = UniformReplay::build(&config)?;
    let items: Vec<i32> = (0..50).collect();
    let state = buffer.add_batch(buffer.init(&0)?, &items)?;
    assert_eq!(buffer.size(&state), 50);

    let batch = buffer.sample(&state, 123, 500)?;
    assert_eq!(batch.len(), 500);
    assert!(batch.iter().all(|x| (0..50).contains(x)));
    Ok(())
}
