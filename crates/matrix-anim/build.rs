use std::process::Command;

use time::OffsetDateTime;

/// `git describe` of the checkout, if there is one.
fn describe() -> Option<String> {
    let out = Command::new("git")
        .args(["describe", "--always", "--dirty"])
        .output()
        .ok()?;
    let text = String::from_utf8(out.stdout).ok()?;
    let text = text.trim();
    (out.status.success() && !text.is_empty()).then(|| text.to_string())
}

/// Day the binary was built; `SOURCE_DATE_EPOCH` pins it for reproducible builds.
fn build_day() -> time::Date {
    std::env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|secs| secs.parse::<i64>().ok())
        .and_then(|secs| OffsetDateTime::from_unix_timestamp(secs).ok())
        .unwrap_or_else(OffsetDateTime::now_utc)
        .date()
}

fn main() {
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");
    println!("cargo:rerun-if-changed=../../.git/HEAD");

    let pkg = std::env::var("CARGO_PKG_VERSION").unwrap_or_default();
    let version = match describe() {
        Some(rev) => format!("{pkg} ({rev}, built {})", build_day()),
        None => format!("{pkg} (built {})", build_day()),
    };
    println!("cargo:rustc-env=MATRIX_ANIM_VERSION={version}");
}
