//! Shared constants for test infrastructure

// Repository under test
pub const TEST_OWNER: &str = "loratrack";
pub const TEST_REPO: &str = "decoder";

// Tag constants (with 'v' prefix)
pub const TAG_V1_1_0: &str = "v1.1.0";
pub const TAG_V1_2_3: &str = "v1.2.3";
pub const TAG_V1_4_0: &str = "v1.4.0";
pub const TAG_V1_5_0: &str = "v1.5.0";
pub const TAG_V2_0_0_RC1: &str = "v2.0.0-rc1";

// Running versions
pub const VERSION_DEV: &str = "dev";
pub const VERSION_1_0_0: &str = "1.0.0";

// Binary content for testing
pub const OLD_BINARY: &[u8] = b"OLD";
pub const NEW_BINARY: &[u8] = b"NEW";

// Checksum constants
pub const WRONG_CHECKSUM: &str = "0000000000000000000000000000000000000000000000000000000000000000";
