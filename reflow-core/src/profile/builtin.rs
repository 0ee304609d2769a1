//! Factory profiles compiled into the firmware
//!
//! Each table holds one setpoint per 10 s of process time and is
//! zero-terminated, so at most 47 entries are usable.

use super::{BuiltinProfile, MAX_SAMPLES};

/// SynTECH-LF normal temperature lead-free
const SYNTECH_LF: BuiltinProfile = BuiltinProfile {
    name: "LF DESIGNED PROF",
    samples: [
        25, 25, 40, 55, 70, 85, 100, 115, 130, 145, 152, 155, 158, 161, 164, 167, //
        170, 173, 176, 179, 182, 185, 188, 191, 194, 197, 200, 210, 220, 230, 240, 240, //
        240, 240, 230, 220, 210, 200, 190, 180, 170, 160, 0, 0, 0, 0, 0, 0,
    ],
};

/// NC-31 low temperature lead-free, peak raised from 158 to 160
const NC31: BuiltinProfile = BuiltinProfile {
    name: "NC-31 LOW-TEMP LF",
    samples: [
        50, 50, 50, 50, 55, 70, 85, 90, 95, 100, 102, 105, 107, 110, 112, 115, // 0-150s
        117, 120, 122, 127, 132, 138, 148, 158, 160, 0, 0, 0, 0, 0, 0, 0, //
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    ],
};

/// Amtech 4300 63Sn/37Pb leaded
const AM4300: BuiltinProfile = BuiltinProfile {
    name: "4300 63SN/37PB",
    samples: [
        50, 50, 50, 60, 73, 86, 100, 113, 126, 140, 143, 147, 150, 154, 157, 161, // 0-150s
        164, 168, 171, 175, 179, 183, 195, 207, 215, 0, 0, 0, 0, 0, 0, 0, //
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    ],
};

/// Step to 245 after 30 s, for measuring the oven's ramp rate
#[cfg(feature = "ramp-test-profile")]
const RAMP_SPEED_TEST: BuiltinProfile = BuiltinProfile {
    name: "RAMP SPEED TEST",
    samples: [
        50, 50, 50, 50, 245, 245, 245, 245, 245, 245, 245, 245, 245, 245, 245, 245, //
        245, 245, 245, 245, 245, 245, 245, 245, 245, 0, 0, 0, 0, 0, 0, 0, //
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    ],
};

#[cfg(not(feature = "ramp-test-profile"))]
const BUILTINS: [BuiltinProfile; 3] = [SYNTECH_LF, NC31, AM4300];

#[cfg(feature = "ramp-test-profile")]
const BUILTINS: [BuiltinProfile; 4] = [SYNTECH_LF, NC31, AM4300, RAMP_SPEED_TEST];

/// The factory catalog, in logical index order
pub static BUILTIN_PROFILES: &[BuiltinProfile] = &BUILTINS;

// Every factory table must end in the terminator sentinel
const _: () = {
    let mut i = 0;
    while i < BUILTINS.len() {
        assert!(BUILTINS[i].samples[MAX_SAMPLES - 1] == 0);
        i += 1;
    }
};
