//! Embedded code-set data.
//!
//! The ISO 20022 external code-set document is embedded at compile time with
//! `include_str!()` so validation works without any files on disk.

/// File name of the embedded document, used in logs and errors.
pub const EXTERNAL_CODE_SETS_NAME: &str = "4Q2022_ExternalCodeSets_v1.json";

/// ISO 20022 external code sets, 4Q2022 release.
pub const EXTERNAL_CODE_SETS: &str =
    include_str!("../data/external/4Q2022_ExternalCodeSets_v1.json");
