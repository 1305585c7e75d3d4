//! # Processor Flows
//!
//! Drives `GardenProcessor` with encoded transactions, the way a validator
//! would, and inspects the raw bytes left in the state service.
//!
//! ```text
//! [Client] ──payload + signer──→ [GardenProcessor] ──get_state──→ [State]
//!                                       │
//!                                       └────── set_state (1 call) ──→ [State]
//! ```
//!
//! ## Test Categories
//!
//! 1. **Happy Path**: register then report, pump decision persisted
//! 2. **Rejections**: each rejection leaves the state byte-identical
//! 3. **Replay**: same timestamp overwrites, new timestamp appends
//! 4. **External Writers**: whitelist revocation and foreign keys

#[cfg(test)]
mod tests {
    use crate::fixtures::{raw_request, request, K1, K2};
    use gc_01_address_derivation::AddressDeriver;
    use gc_02_state_transition::prelude::*;

    fn setup() -> (GardenProcessor, InMemoryState) {
        garden_telemetry::init_test_logging();
        let processor = GardenProcessor::new(ContractConfig::default()).unwrap();
        (processor, InMemoryState::new())
    }

    fn deriver() -> AddressDeriver {
        AddressDeriver::new(gc_02_state_transition::config::DEFAULT_FAMILY_NAME)
    }

    fn register(processor: &GardenProcessor, state: &InMemoryState, device_id: &str, signer: &str) {
        processor
            .apply(&request(&Command::register(device_id, "t0"), signer), state)
            .unwrap();
    }

    fn stored_device(state: &InMemoryState, device_id: &str) -> DeviceRecord {
        let address = deriver().device_address(device_id);
        DeviceRecord::decode(&address, &state.get_raw(&address).unwrap()).unwrap()
    }

    // =========================================================================
    // HAPPY PATH
    // =========================================================================

    #[test]
    fn test_register_then_report_low_humidity() {
        let (processor, state) = setup();

        let effects = processor
            .apply(&request(&Command::register("dev-1", "t0"), K1), &state)
            .unwrap();
        assert_eq!(effects.write_count(), 1);

        let effects = processor
            .apply(
                &request(&Command::telemetry("dev-1", 26.0, 22.0, "t1"), K1),
                &state,
            )
            .unwrap();
        assert_eq!(effects.write_count(), 2);
        assert_eq!(effects.pump_status(), Some(PumpStatus::On));

        let telemetry_address = deriver().telemetry_address("dev-1", "t1");
        let raw = state.get_raw(&telemetry_address).unwrap();
        assert_eq!(
            String::from_utf8(raw).unwrap(),
            r#"{"block_height": null, "device_id": "dev-1", "humidity": 22.0, "pump_status": "ON", "smart_contract_triggered": true, "temperature": 26.0, "timestamp": "t1"}"#
        );

        let device = stored_device(&state, "dev-1");
        assert_eq!(device.owner_public_key, K1);
        assert_eq!(device.last_update.as_deref(), Some("t1"));
        let reading = device.last_reading.unwrap();
        assert_eq!(reading.pump_status, PumpStatus::On);
        assert_eq!(reading.humidity, 22.0);

        assert_eq!(state.len(), 2);
        assert_eq!(state.commit_count(), 2);
    }

    #[test]
    fn test_pump_threshold_through_processor() {
        let (processor, state) = setup();
        register(&processor, &state, "dev-1", K1);

        let cases = [(29.9, PumpStatus::On), (30.0, PumpStatus::Off), (30.1, PumpStatus::Off)];
        for (i, (humidity, expected)) in cases.into_iter().enumerate() {
            let ts = format!("t{i}");
            let effects = processor
                .apply(
                    &request(&Command::telemetry("dev-1", 21.0, humidity, &ts), K1),
                    &state,
                )
                .unwrap();
            assert_eq!(effects.pump_status(), Some(expected), "humidity {humidity}");

            let address = deriver().telemetry_address("dev-1", &ts);
            let record = TelemetryRecord::decode(&address, &state.get_raw(&address).unwrap()).unwrap();
            assert_eq!(record.smart_contract_triggered, expected.is_on());
        }
    }

    #[test]
    fn test_numeric_string_payload_is_accepted() {
        let (processor, state) = setup();
        register(&processor, &state, "dev-1", K1);

        let payload = br#"{"action": "SEND_TELEMETRY", "device_id": "dev-1", "temperature": "25.5", "humidity": "28", "timestamp": "t1"}"#;
        let effects = processor.apply(&raw_request(payload.to_vec(), K1), &state).unwrap();
        assert_eq!(effects.pump_status(), Some(PumpStatus::On));
    }

    // =========================================================================
    // REJECTIONS
    // =========================================================================

    #[test]
    fn test_second_registration_changes_nothing() {
        let (processor, state) = setup();
        register(&processor, &state, "dev-1", K1);
        let after_first = state.snapshot();

        let err = processor
            .apply(&request(&Command::register("dev-1", "t9"), K2), &state)
            .unwrap_err();
        assert_eq!(
            err,
            ApplyError::InvalidTransaction("Device dev-1 is already registered".to_string())
        );
        assert_eq!(state.snapshot(), after_first);
        assert_eq!(stored_device(&state, "dev-1").owner_public_key, K1);
    }

    #[test]
    fn test_telemetry_before_registration() {
        let (processor, state) = setup();

        let err = processor
            .apply(
                &request(&Command::telemetry("dev-1", 26.0, 22.0, "t1"), K1),
                &state,
            )
            .unwrap_err();
        assert_eq!(
            err,
            ApplyError::InvalidTransaction("Device dev-1 is not registered".to_string())
        );
        assert!(state.is_empty());
        assert_eq!(state.commit_count(), 0);
    }

    #[test]
    fn test_foreign_signer_is_refused() {
        let (processor, state) = setup();
        register(&processor, &state, "dev-1", K1);
        let before = state.snapshot();

        let err = processor
            .apply(
                &request(&Command::telemetry("dev-1", 26.0, 22.0, "t1"), K2),
                &state,
            )
            .unwrap_err();
        let expected = EngineError::identity_mismatch("dev-1", K1, K2).to_string();
        assert_eq!(err, ApplyError::InvalidTransaction(expected));
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_refused_write_set_leaves_no_trace() {
        let (processor, state) = setup();
        register(&processor, &state, "dev-1", K1);
        let before = state.snapshot();

        state.set_reject_writes(true);
        let err = processor
            .apply(
                &request(&Command::telemetry("dev-1", 26.0, 22.0, "t1"), K1),
                &state,
            )
            .unwrap_err();
        assert!(matches!(err, ApplyError::InternalError(_)));
        assert_eq!(state.snapshot(), before);

        state.set_reject_writes(false);
        processor
            .apply(
                &request(&Command::telemetry("dev-1", 26.0, 22.0, "t1"), K1),
                &state,
            )
            .unwrap();
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_corrupt_device_value_is_rejected() {
        let (processor, state) = setup();
        state.put_raw(deriver().device_address("dev-1"), b"not json".to_vec());

        let err = processor
            .apply(
                &request(&Command::telemetry("dev-1", 26.0, 22.0, "t1"), K1),
                &state,
            )
            .unwrap_err();
        assert!(matches!(err, ApplyError::InvalidTransaction(_)));
        assert_eq!(state.len(), 1);
    }

    // =========================================================================
    // REPLAY
    // =========================================================================

    #[test]
    fn test_replay_overwrites_same_address() {
        let (processor, state) = setup();
        register(&processor, &state, "dev-1", K1);
        let telemetry = request(&Command::telemetry("dev-1", 26.0, 22.0, "t1"), K1);

        let first = processor.apply(&telemetry, &state).unwrap();
        let after_first = state.snapshot();
        let second = processor.apply(&telemetry, &state).unwrap();

        assert_eq!(first, second);
        assert_eq!(state.snapshot(), after_first);
        assert_eq!(state.len(), 2);

        processor
            .apply(
                &request(&Command::telemetry("dev-1", 26.0, 22.0, "t2"), K1),
                &state,
            )
            .unwrap();
        assert_eq!(state.len(), 3);
        assert_ne!(
            deriver().telemetry_address("dev-1", "t1"),
            deriver().telemetry_address("dev-1", "t2")
        );
    }

    // =========================================================================
    // EXTERNAL WRITERS
    // =========================================================================

    #[test]
    fn test_revoked_whitelist_blocks_owner() {
        let (processor, state) = setup();
        register(&processor, &state, "dev-1", K1);

        let address = deriver().device_address("dev-1");
        let mut device = stored_device(&state, "dev-1");
        device.whitelisted = false;
        state.put_raw(address, device.encode().unwrap());
        let before = state.snapshot();

        let err = processor
            .apply(
                &request(&Command::telemetry("dev-1", 26.0, 22.0, "t1"), K1),
                &state,
            )
            .unwrap_err();
        assert_eq!(
            err,
            ApplyError::InvalidTransaction("Device dev-1 is not whitelisted".to_string())
        );
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_foreign_keys_survive_update() {
        let (processor, state) = setup();
        let address = deriver().device_address("dev-1");
        state.put_raw(
            address.clone(),
            format!(
                r#"{{"device_id": "dev-1", "public_key": "{K1}", "registered": true, "whitelisted": true, "zone": "north-bed"}}"#
            )
            .into_bytes(),
        );

        processor
            .apply(
                &request(&Command::telemetry("dev-1", 24.0, 45.0, "t1"), K1),
                &state,
            )
            .unwrap();

        let raw: serde_json::Value = serde_json::from_slice(&state.get_raw(&address).unwrap()).unwrap();
        assert_eq!(raw["zone"], "north-bed");
        assert_eq!(raw["last_reading"]["pump_status"], "OFF");
        assert_eq!(raw["device_name"], "Unnamed Device");
    }

    #[test]
    fn test_null_named_device_keeps_working() {
        let (processor, state) = setup();
        let address = deriver().device_address("dev-1");
        state.put_raw(
            address.clone(),
            format!(
                r#"{{"device_id": "dev-1", "device_name": null, "public_key": "{K1}", "registered": true, "registered_at": null, "whitelisted": true}}"#
            )
            .into_bytes(),
        );

        let effects = processor
            .apply(
                &request(&Command::telemetry("dev-1", 24.0, 22.0, "t1"), K1),
                &state,
            )
            .unwrap();
        assert_eq!(effects.pump_status(), Some(PumpStatus::On));

        let raw: serde_json::Value = serde_json::from_slice(&state.get_raw(&address).unwrap()).unwrap();
        assert!(raw["device_name"].is_null());
        assert_eq!(raw["last_update"], "t1");

        let before = state.snapshot();
        let err = processor
            .apply(&request(&Command::register("dev-1", "t9"), K2), &state)
            .unwrap_err();
        assert_eq!(
            err,
            ApplyError::InvalidTransaction("Device dev-1 is already registered".to_string())
        );
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_null_name_in_registration_is_stored() {
        let (processor, state) = setup();
        let payload = br#"{"action": "REGISTER_DEVICE", "device_id": "dev-1", "device_name": null, "timestamp": "t0"}"#;
        processor.apply(&raw_request(payload.to_vec(), K1), &state).unwrap();

        let raw = state.get_raw(&deriver().device_address("dev-1")).unwrap();
        let text = String::from_utf8(raw).unwrap();
        assert!(text.contains(r#""device_name": null"#));
        assert_eq!(stored_device(&state, "dev-1").device_name, None);
    }

    #[test]
    fn test_unregistered_flag_allows_registration() {
        let (processor, state) = setup();
        let address = deriver().device_address("dev-1");
        state.put_raw(
            address,
            br#"{"device_id": "dev-1", "registered": false, "whitelisted": true}"#.to_vec(),
        );

        let err = processor
            .apply(
                &request(&Command::telemetry("dev-1", 24.0, 45.0, "t1"), K1),
                &state,
            )
            .unwrap_err();
        assert!(matches!(err, ApplyError::InvalidTransaction(_)));

        register(&processor, &state, "dev-1", K2);
        assert_eq!(stored_device(&state, "dev-1").owner_public_key, K2);
    }
}
