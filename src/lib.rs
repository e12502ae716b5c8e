//! Round-trip verification harness for archive tooling.
//!
//! Each case stages a set of fixture files, packs them with an external
//! packer, unpacks the archive with an external extractor, packs the extracted
//! tree again and checks that both archives hash to the same digest.

pub mod cmd;
pub mod fsutil;
pub mod roundtrip;
pub mod runner;
pub mod util;
