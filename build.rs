use std::process::Command;

// Embed the commit and build date shown by `promptdeck version --verbose`.
fn main() {
    println!("cargo:rustc-env=GIT_SHA={}", command_output("git", &["rev-parse", "--short", "HEAD"]));
    println!("cargo:rustc-env=BUILD_DATE={}", command_output("date", &["+%Y-%m-%d"]));
}

fn command_output(program: &str, args: &[&str]) -> String {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
