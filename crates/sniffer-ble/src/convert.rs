//! Mapping from btleplug types onto the capture data model

use btleplug::api::{AddressType as BtAddressType, BDAddr, CentralState, PeripheralProperties};
use sniffer_core::{AddressType, AdvertisementEvent, RadioState};

/// Map the platform address type; a missing type is `Unknown`
#[allow(unreachable_patterns)]
pub fn address_type_from_btleplug(address_type: Option<BtAddressType>) -> AddressType {
    match address_type {
        Some(BtAddressType::Random) => AddressType::Random,
        Some(BtAddressType::Public) => AddressType::Public,
        _ => AddressType::Unknown,
    }
}

/// Map the platform adapter state
#[allow(unreachable_patterns)]
pub fn radio_state_from_central(state: CentralState) -> RadioState {
    match state {
        CentralState::PoweredOn => RadioState::PoweredOn,
        CentralState::PoweredOff => RadioState::PoweredOff,
        _ => RadioState::Unknown,
    }
}

/// Render an address as lowercase, colon-separated hex (`aa:bb:cc:dd:ee:ff`).
///
/// Hashes in existing capture logs were computed over this form, so the
/// rendering must not change.
pub fn address_token(address: BDAddr) -> String {
    address.to_string().to_ascii_lowercase()
}

/// Build an advertisement event from its parts.
///
/// Reports without an RSSI carry nothing worth recording and yield `None`.
pub fn advertisement_from_parts(
    address: BDAddr,
    address_type: Option<BtAddressType>,
    rssi: Option<i16>,
) -> Option<AdvertisementEvent> {
    let rssi = rssi?;
    Some(AdvertisementEvent::new(
        address_token(address),
        address_type_from_btleplug(address_type),
        rssi,
    ))
}

/// Build an advertisement event from a peripheral's current properties
pub fn advertisement_from_properties(properties: &PeripheralProperties) -> Option<AdvertisementEvent> {
    advertisement_from_parts(properties.address, properties.address_type, properties.rssi)
}
