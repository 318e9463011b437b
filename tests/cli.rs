/*
 *  tests/cli.rs
 *
 *  End-to-end checks of the command-line contract: stdout text
 *  plus exit status of the compiled binary
 *
 *  ee2mac - MAC address from I2C EEPROM
 *  (c) 2020-26 Stuart Hunter
 */

use std::env;
use std::fs;
use std::process::Command;

fn run(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_ee2mac"))
        .args(args)
        .output()
        .expect("binary spawns")
}

#[test]
fn no_arguments_is_a_help_request() {
    let out = run(&[]);

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("--eeprom"));
}

#[test]
fn missing_eeprom_or_offset_is_refused() {
    let out = run(&["-o", "0xfa"]);

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("an EEPROM node (-e) and a MAC offset (-o) are both required"));
    assert!(stdout.contains("Usage:"));
}

#[test]
fn empty_eeprom_node_exits_with_eio() {
    let scratch = env::temp_dir().join(format!("ee2mac-cli-{}", std::process::id()));
    fs::create_dir_all(&scratch).unwrap();
    fs::write(scratch.join("operstate"), b"down\n").unwrap();

    // The status path is /sys/class/net/<name>/operstate, so a relative
    // name climbing back out of sysfs lands on the scratch file.
    let iface = format!("../../..{}", scratch.display());
    let out = run(&["-i", &iface, "-e", "/dev/null", "-o", "0"]);
    let _ = fs::remove_dir_all(&scratch);

    assert_eq!(out.status.code(), Some(libc::EIO));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("held 0 of 6 MAC bytes"));
    assert!(!stdout.contains("MAC Address will be set to"));
}
