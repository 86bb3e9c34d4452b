//! In-RAM bond table for Just Works pairing.
//!
//! Hosts expect a HID peripheral to bond. Keys and CCCD state live only
//! until reset; a host that lost its bond simply pairs again.

use core::cell::RefCell;

use defmt::{info, warn};
use heapless::Vec;
use nrf_softdevice::ble::gatt_server;
use nrf_softdevice::ble::security::{IoCapabilities, SecurityHandler};
use nrf_softdevice::ble::{Connection, EncryptionInfo, IdentityKey, MasterId, SecurityMode};
use static_cell::StaticCell;

/// Number of hosts remembered at once; the oldest is evicted first.
const MAX_BONDS: usize = 4;

struct HostBond {
    master_id: MasterId,
    key: EncryptionInfo,
}

pub struct Bonder {
    bonds: RefCell<Vec<HostBond, MAX_BONDS>>,
}

impl Bonder {
    const fn new() -> Self {
        Self {
            bonds: RefCell::new(Vec::new()),
        }
    }
}

impl SecurityHandler for Bonder {
    fn io_capabilities(&self) -> IoCapabilities {
        IoCapabilities::None
    }

    fn can_bond(&self, _conn: &Connection) -> bool {
        true
    }

    fn on_bonded(
        &self,
        _conn: &Connection,
        master_id: MasterId,
        key: EncryptionInfo,
        _peer_id: IdentityKey,
    ) {
        info!("BLE: host bonded");
        let mut bonds = self.bonds.borrow_mut();
        if let Some(existing) = bonds.iter_mut().find(|b| b.master_id == master_id) {
            existing.key = key;
            return;
        }

        if bonds.is_full() {
            bonds.remove(0);
        }

        let _ = bonds.push(HostBond { master_id, key });
    }

    fn get_key(&self, _conn: &Connection, master_id: MasterId) -> Option<EncryptionInfo> {
        self.bonds
            .borrow()
            .iter()
            .find_map(|b| (b.master_id == master_id).then_some(b.key))
    }

    fn on_security_update(&self, _conn: &Connection, mode: SecurityMode) {
        info!("BLE: security mode updated: {}", mode);
    }

    fn save_sys_attrs(&self, _conn: &Connection) {
        // CCCDs are re-written by the host after each reconnect.
    }

    fn load_sys_attrs(&self, conn: &Connection) {
        // Nothing is persisted, so every link starts from empty CCCDs.
        if let Err(e) = gatt_server::set_sys_attrs(conn, None) {
            warn!("BLE: restoring system attributes failed: {}", e);
        }
    }
}

pub fn bonder() -> &'static Bonder {
    static BONDER: StaticCell<Bonder> = StaticCell::new();
    BONDER.init(Bonder::new())
}
