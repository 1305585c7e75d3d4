//! # Concurrent Submission Tests
//!
//! Many threads share one processor and one state service. Commands for the
//! same device must serialize; commands for different devices must not lose
//! each other's writes.

#[cfg(test)]
mod tests {
    use crate::fixtures::{request, timestamp, K1, K2};
    use gc_01_address_derivation::AddressDeriver;
    use gc_02_state_transition::config::DEFAULT_FAMILY_NAME;
    use gc_02_state_transition::prelude::*;
    use rand::Rng;
    use std::sync::Arc;
    use std::thread;

    const THREADS: usize = 8;

    fn shared() -> (Arc<GardenProcessor>, Arc<InMemoryState>) {
        let processor = GardenProcessor::new(ContractConfig::default()).unwrap();
        (Arc::new(processor), Arc::new(InMemoryState::new()))
    }

    #[test]
    fn test_racing_registrations_bind_one_owner() {
        let (processor, state) = shared();

        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let processor = Arc::clone(&processor);
                let state = Arc::clone(&state);
                thread::spawn(move || {
                    let signer = if i % 2 == 0 { K1 } else { K2 };
                    processor
                        .apply(&request(&Command::register("dev-1", "t0"), signer), &*state)
                        .map(|_| signer)
                })
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        let winners: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
        assert_eq!(winners.len(), 1);
        assert_eq!(state.commit_count(), 1);

        let address = AddressDeriver::new(DEFAULT_FAMILY_NAME).device_address("dev-1");
        let device = DeviceRecord::decode(&address, &state.get_raw(&address).unwrap()).unwrap();
        assert_eq!(device.owner_public_key, *winners[0]);
    }

    #[test]
    fn test_disjoint_devices_all_land() {
        let (processor, state) = shared();
        let readings_per_device = 20;

        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let processor = Arc::clone(&processor);
                let state = Arc::clone(&state);
                thread::spawn(move || {
                    let device_id = format!("dev-{i}");
                    let mut rng = rand::thread_rng();
                    processor
                        .apply(&request(&Command::register(&device_id, "t0"), K1), &*state)
                        .unwrap();
                    for n in 0..readings_per_device {
                        let humidity: f64 = rng.gen_range(0.0..100.0);
                        processor
                            .apply(
                                &request(
                                    &Command::telemetry(&device_id, 22.0, humidity, timestamp(n)),
                                    K1,
                                ),
                                &*state,
                            )
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(state.len(), THREADS * (1 + readings_per_device));
        let stats = processor.stats();
        assert_eq!(stats.devices_registered, THREADS as u64);
        assert_eq!(stats.telemetry_recorded, (THREADS * readings_per_device) as u64);
        assert_eq!(stats.rejected, 0);
    }

    #[test]
    fn test_same_device_readings_keep_last_update_consistent() {
        let (processor, state) = shared();
        processor
            .apply(&request(&Command::register("dev-1", "t0"), K1), &*state)
            .unwrap();

        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let processor = Arc::clone(&processor);
                let state = Arc::clone(&state);
                thread::spawn(move || {
                    processor
                        .apply(
                            &request(&Command::telemetry("dev-1", 20.0, 50.0, timestamp(i)), K1),
                            &*state,
                        )
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let deriver = AddressDeriver::new(DEFAULT_FAMILY_NAME);
        let address = deriver.device_address("dev-1");
        let device = DeviceRecord::decode(&address, &state.get_raw(&address).unwrap()).unwrap();
        let last = device.last_update.unwrap();
        let reading = device.last_reading.unwrap();

        assert_eq!(reading.timestamp, last);
        assert!(state.get_raw(&deriver.telemetry_address("dev-1", &last)).is_some());
        assert_eq!(state.len(), 1 + THREADS);
    }
}
