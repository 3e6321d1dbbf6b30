//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `metamodel_core` linkage.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `metamodel_cli [LOG_DIR]`. With a directory argument, logging is
//! initialized there at the build's default level.

use metamodel_core::model::{FIELD_CLASSIFICATION_ID, FIELD_OBJ_ID, FIELD_SUPPLIER_ACCOUNT};
use metamodel_core::Condition;
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Some(log_dir) = std::env::args().nth(1) {
        if let Err(err) = metamodel_core::init_logging(metamodel_core::default_log_level(), &log_dir)
        {
            eprintln!("metamodel_core logging init failed: {err}");
            return ExitCode::FAILURE;
        }
    }

    println!("metamodel_core ping={}", metamodel_core::ping());
    println!("metamodel_core version={}", metamodel_core::core_version());

    let probe = Condition::new()
        .field(FIELD_SUPPLIER_ACCOUNT)
        .eq("0")
        .field(FIELD_OBJ_ID)
        .eq("host")
        .field(FIELD_CLASSIFICATION_ID)
        .in_values(["bk_host_manage", "bk_network"]);
    match probe.to_json() {
        Ok(json) => println!("metamodel_core condition={json}"),
        Err(err) => {
            eprintln!("metamodel_core condition render failed: {err}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
