use std::env;
use std::process::Command;

// NEON is absent on purpose: its rsqrt estimate is ~8 bits, which a single
// refinement step cannot bring under the 1e-6 ceiling.
const SSE_ARCHES: &[&str] = &["x86", "x86_64"];

// Reads the features rustc will actually compile for, so cross builds get the
// target's capabilities and not the host's.
fn target_has_sse() -> bool {
    let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    let target_features = env::var("CARGO_CFG_TARGET_FEATURE").unwrap_or_default();

    SSE_ARCHES.contains(&arch.as_str()) && target_features.split(',').any(|f| f == "sse")
}

struct PlatformDetector;
impl PlatformDetector {
    fn compiler_channel() -> String {
        let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
        let output = Command::new(rustc)
            .args(["--version", "--verbose"])
            .output()
            .expect("Failed to execute rustc");

        let version_info = String::from_utf8_lossy(&output.stdout);

        if version_info.contains("nightly") {
            "nightly".to_string()
        } else {
            "stable".to_string()
        }
    }

    fn apply(sse: bool) {
        // Without SSE the portable scalar tiers are all that is compiled.
        if sse {
            println!("cargo:rustc-cfg=sse");
        } else {
            println!("cargo:rustc-cfg=fallback");
        }

        println!("cargo::rustc-check-cfg=cfg(sse)");
        println!("cargo::rustc-check-cfg=cfg(fallback)");
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=RUSTC");

    let rustc_channel = PlatformDetector::compiler_channel();
    println!("cargo:rustc-cfg=rustc_channel=\"{rustc_channel}\"");
    println!("cargo::rustc-check-cfg=cfg(rustc_channel, values(\"nightly\", \"stable\"))");

    // `f128` is only usable behind a nightly feature gate, so the width is
    // compiled in only when both the cargo feature and the channel allow it.
    let f128_requested = env::var_os("CARGO_FEATURE_F128").is_some();
    if f128_requested && rustc_channel == "nightly" {
        println!("cargo:rustc-cfg=extended_precision");
    } else if f128_requested {
        println!("cargo:warning=feature `f128` needs a nightly compiler; extended precision is disabled");
    }
    println!("cargo::rustc-check-cfg=cfg(extended_precision)");

    PlatformDetector::apply(target_has_sse());
}
