//! Compiles the RON files in the workspace `devices/` directory into the
//! static device table included by `device::catalog`.

use std::env;
use std::path::{Path, PathBuf};

use minipro_devices_codegen::{family_files, generate, Error};

fn emit(devices: &Path, output: &Path) -> Result<(), Error> {
    println!("cargo::rerun-if-changed={}", devices.display());
    for file in family_files(devices)? {
        println!("cargo::rerun-if-changed={}", file.display());
    }
    generate(devices, output)
}

fn main() {
    let devices = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../devices");
    let out_dir = PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR is set for build scripts"));

    if let Err(e) = emit(&devices, &out_dir.join("devices_generated.rs")) {
        panic!("cannot generate the device catalog: {}", e);
    }
}
