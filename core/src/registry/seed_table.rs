//! Fixed decorrelation seed table
//!
//! Seeds handed to `Table`-sourced streams at run boundaries. The constants
//! are the first 16 outputs of a splitmix64 stream started at state 0, so
//! the table is reproducible from its definition.
//!
//! CRITICAL: the table and the cursor scheme below are frozen. Changing
//! either one changes every historical `Table`-seeded sequence and is a
//! breaking change.

/// First 16 splitmix64 outputs (initial state 0)
pub(crate) const SEED_TABLE: [u64; 16] = [
    0xE220_A839_7B1D_CDAF,
    0x6E78_9E6A_A1B9_65F4,
    0x06C4_5D18_8009_454F,
    0xF88B_B8A8_724C_81EC,
    0x1B39_896A_51A8_749B,
    0x53CB_9F0C_747E_A2EA,
    0x2C82_9ABE_1F45_32E1,
    0xC584_133A_C916_AB3C,
    0x3EE5_7890_41C9_8AC3,
    0xF3B8_488C_368C_B0A6,
    0x657E_ECDD_3CB1_3D09,
    0xC2D3_26E0_055B_DEF6,
    0x8621_A03F_E0BB_DB7B,
    0x8E1F_7555_983A_A92F,
    0xB54E_0F16_00CC_4D19,
    0x84BB_3F97_971D_80AB,
];

/// Golden-ratio constant used to remix wrapped generations
const WRAP_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seed for the `cursor`-th table reseed performed by a registry
///
/// The first 16 draws consume the table directly. Past that the table wraps,
/// with each wrap generation XOR-mixed so later draws never repeat earlier
/// ones in practice.
pub(crate) fn table_seed(cursor: u64) -> u64 {
    let idx = (cursor % SEED_TABLE.len() as u64) as usize;
    let generation = cursor / SEED_TABLE.len() as u64;
    SEED_TABLE[idx] ^ generation.wrapping_mul(WRAP_MIX)
}
