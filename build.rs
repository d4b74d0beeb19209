use std::process::Command;

use chrono::Utc;

fn main() {
    println!("cargo:rustc-env=BUILD_TIME={}", Utc::now().to_rfc3339());

    if let Ok(output) = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
    {
        if output.status.success() {
            let hash = String::from_utf8_lossy(&output.stdout);
            println!("cargo:rustc-env=GIT_HASH={}", hash.trim());
        }
    }

    println!("cargo:rerun-if-changed=build.rs");
}
