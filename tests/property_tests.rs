//! Property-based tests for the translation pipeline.
//!
//! Uses proptest to check the paging invariants across random address streams.

use std::collections::HashSet;
use std::io::Cursor;

use demand_pager::backing_store::BackingStore;
use demand_pager::memory::FrameAllocator;
use demand_pager::translation::{combine, split};
use demand_pager::{VirtualAddress, VmManager, MAX_FRAMES, MAX_VIRTUAL_ADDRESS, PAGE_SIZE, PAGE_TABLE_SIZE};
use proptest::prelude::*;

/// Backing store where every byte is derived from its absolute offset
fn patterned_store() -> BackingStore<Cursor<Vec<u8>>> {
    let data: Vec<u8> = (0..PAGE_TABLE_SIZE * PAGE_SIZE).map(|i| (i * 7 % 251) as u8).collect();
    BackingStore::from_reader(Cursor::new(data)).unwrap()
}

fn address_stream() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0..=MAX_VIRTUAL_ADDRESS, 1..200)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_offset_survives_translation(address in 0..=MAX_VIRTUAL_ADDRESS, frame in 0..MAX_FRAMES as u32) {
        let (page, offset) = split(address);
        prop_assert_eq!((page << 8) | offset, address);
        prop_assert_eq!(combine(frame, offset) & 255, address & 255);
    }

    #[test]
    fn prop_one_fault_per_distinct_page(raw in address_stream()) {
        let mut vm = VmManager::new(patterned_store());
        let mut seen = HashSet::new();

        for &a in &raw {
            let va = VirtualAddress::from_raw(a);
            let t = vm.translate(va).unwrap();
            prop_assert_eq!(t.page_fault, seen.insert(va.page_number));
        }
        prop_assert_eq!(vm.statistics().page_faults as usize, seen.len());
        prop_assert_eq!(vm.frame_allocator().allocated(), seen.len());
    }

    #[test]
    fn prop_values_match_backing_store(raw in address_stream()) {
        let mut vm = VmManager::new(patterned_store());
        for &a in &raw {
            let t = vm.translate(VirtualAddress::from_raw(a)).unwrap();
            let expected = (a as usize * 7 % 251) as u8 as i8;
            prop_assert_eq!(t.physical_address.value, expected);
            prop_assert_eq!(t.physical_address.frame_offset, a & 255);
        }
    }

    #[test]
    fn prop_repeat_translation_is_stable(raw in address_stream()) {
        let mut vm = VmManager::new(patterned_store());
        for &a in &raw {
            let va = VirtualAddress::from_raw(a);
            let first = vm.translate(va).unwrap();
            let second = vm.translate(va).unwrap();
            prop_assert!(!second.page_fault);
            prop_assert_eq!(first.physical_address, second.physical_address);
        }
    }

    #[test]
    fn prop_allocator_never_repeats(capacity in 1..=MAX_FRAMES, requests in 1usize..300) {
        let mut ffa = FrameAllocator::with_capacity(capacity);
        let mut handed_out = HashSet::new();
        for _ in 0..requests {
            match ffa.allocate() {
                Ok(frame) => prop_assert!(handed_out.insert(frame)),
                Err(_) => prop_assert_eq!(handed_out.len(), capacity),
            }
        }
        prop_assert_eq!(handed_out.len(), requests.min(capacity));
    }

    #[test]
    fn prop_fault_rate_is_exact(raw in address_stream()) {
        let mut vm = VmManager::new(patterned_store());
        vm.translate_batch(&raw.iter().map(|&a| VirtualAddress::from_raw(a)).collect::<Vec<_>>()).unwrap();

        let stats = vm.statistics();
        prop_assert_eq!(stats.total_addresses, raw.len());
        let rate = stats.fault_rate().unwrap();
        prop_assert_eq!(rate, stats.page_faults as f64 / raw.len() as f64);
        prop_assert!(rate > 0.0 && rate <= 1.0);
    }
}
