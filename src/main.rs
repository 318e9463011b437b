/*
 *  main.rs
 *
 *  ee2mac - MAC address from I2C EEPROM
 *	(c) 2020-26 Stuart Hunter
 *
 *	TODO:
 *
 *	This program is free software: you can redistribute it and/or modify
 *	it under the terms of the GNU General Public License as published by
 *	the Free Software Foundation, either version 3 of the License, or
 *	(at your option) any later version.
 *
 *	This program is distributed in the hope that it will be useful,
 *	but WITHOUT ANY WARRANTY; without even the implied warranty of
 *	MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *	GNU General Public License for more details.
 *
 *	See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *	Public License.
 *
 */

// Needs /sys/class/net and SIOCSIFHWADDR
#[cfg(not(target_os = "linux"))]
compile_error!("ee2mac drives Linux network interfaces; there is nothing to build elsewhere");

use clap::{Arg, ArgAction, Command};
use env_logger::Env;
use log::{debug, error, info};
use std::env;
use std::path::PathBuf;
use std::process;

mod eeprom;
mod netif;
mod offset;

use netif::{NetifError, OperState};

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Exit status for I/O faults (EIO). Everything the operator can fix from
/// the command line keeps the historical behavior: a diagnostic on stdout
/// and a success exit.
const EXIT_IO: i32 = libc::EIO;

fn build_cli() -> Command {
    Command::new(env!("CARGO_PKG_NAME")) // Use Cargo.toml name
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(Arg::new("iface")
        .short('i')
        .long("iface")
        .value_name("IFACE")
        .default_value("eth0")
        .help("Interface to use")
        .required(false))
        .arg(Arg::new("eeprom")
        .short('e')
        .long("eeprom")
        .value_name("EEPROM")
        .help("I2C EEPROM bus node (i.e /sys/bus/i2c/devices/3-0050/eeprom)")
        .required(false))
        .arg(Arg::new("offset")
        .short('o')
        .long("offset")
        .value_name("OFFSET")
        .help("Offset of MAC address within EEPROM memory, decimal or hex (i.e 0xfa)")
        .required(false))
        .arg(Arg::new("debug")
        .action(ArgAction::SetTrue)
        .long("debug")
        .short('v')
        .alias("verbose")
        .help("Enable debug log level")
        .required(false))
        .after_help("Reads six MAC bytes from the EEPROM node at OFFSET and programs\n\
            them into IFACE with SIOCSIFHWADDR. The interface must be down.")
}

fn main() {
    let mut cmd = build_cli();

    // A bare invocation is a help request, not an error.
    if env::args_os().len() <= 1 {
        let _ = cmd.print_help();
        return;
    }

    let matches = match cmd.try_get_matches_from_mut(env::args_os()) {
        Ok(matches) => matches,
        Err(err)
            if err.kind() == clap::error::ErrorKind::DisplayHelp
                || err.kind() == clap::error::ErrorKind::DisplayVersion =>
        {
            let _ = err.print();
            return;
        }
        Err(err) => {
            // Historical contract: malformed input is answered with the
            // usage text and a success exit, same as no input at all.
            let _ = err.print();
            let _ = cmd.print_help();
            return;
        }
    };

    let debug_enabled = matches.get_flag("debug");

    // Initialize the logger with the appropriate level based on debug flag
    env_logger::Builder::from_env(Env::default().default_filter_or(if debug_enabled {"debug"} else {"info"}))
        .format_timestamp_secs()
        .init();

    info!("{} v{} built {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), BUILD_DATE);

    let iface = matches.get_one::<String>("iface").unwrap(); // defaulted
    let eeprom = matches.get_one::<String>("eeprom").map(PathBuf::from);
    let offset = match matches.get_one::<String>("offset").map(|s| offset::parse(s)) {
        Some(Ok(value)) => Some(value),
        Some(Err(err)) => {
            println!("Error: {err}");
            let _ = cmd.print_help();
            return;
        }
        None => None,
    };

    // The parser leaves -e/-o optional; refuse to go further without them
    // rather than programming an address from nowhere.
    let (eeprom, offset) = match (eeprom, offset) {
        (Some(eeprom), Some(offset)) => (eeprom, offset),
        _ => {
            println!("Error: an EEPROM node (-e) and a MAC offset (-o) are both required");
            let _ = cmd.print_help();
            return;
        }
    };

    let status_path = netif::operstate_path(iface);
    debug!("probing {}", status_path.display());
    match netif::probe_operstate(&status_path) {
        Err(err) => {
            println!("Error: Invalid network adapter, {iface}");
            debug!("{}: {err}", status_path.display());
            return;
        }
        Ok(OperState::Unknown) => {
            println!("Error: Cannot determine interface operating status");
            return;
        }
        Ok(OperState::Other(state)) => {
            println!(
                "Error: Network interface {iface} is up, cannot set MAC address until it is disabled"
            );
            debug!("{iface} operstate: {state:?}");
            return;
        }
        Ok(OperState::Down) => debug!("{iface} is down"),
    }

    let mac = match eeprom::read_mac(&eeprom, offset) {
        Ok(mac) => mac,
        Err(err @ eeprom::EepromError::Open { .. }) => {
            println!("Error: {err}");
            return;
        }
        Err(err @ eeprom::EepromError::Seek { .. }) => {
            println!("Cannot set offset of EEPROM");
            error!("{err}");
            let _ = cmd.print_help();
            process::exit(EXIT_IO);
        }
        Err(err) => {
            println!("Error: {err}");
            process::exit(EXIT_IO);
        }
    };

    println!("MAC Address will be set to: {mac}");

    if let Err(err) = netif::set_hwaddr(iface, &mac) {
        match err {
            NetifError::NameTooLong(_) => {
                println!("Error: {err}");
                return;
            }
            NetifError::Socket(_) => {
                println!("Error opening socket!");
                error!("{err}");
                process::exit(EXIT_IO);
            }
            NetifError::Ioctl { .. } => {
                println!("Error: cannot set MAC address on {iface}");
                error!("{err}");
                process::exit(EXIT_IO);
            }
        }
    }

    info!("{iface} hardware address updated");
}

#[cfg(test)]
mod tests {
    use super::*;
    use mac_address::MacAddress;

    #[test]
    fn cli_defaults_to_eth0() {
        let matches = build_cli()
            .try_get_matches_from(["ee2mac", "-e", "/dev/null", "-o", "0xfa"])
            .unwrap();
        assert_eq!(matches.get_one::<String>("iface").unwrap(), "eth0");
        assert_eq!(matches.get_one::<String>("eeprom").unwrap(), "/dev/null");
        assert_eq!(matches.get_one::<String>("offset").unwrap(), "0xfa");
    }

    #[test]
    fn cli_takes_long_flags_too() {
        let matches = build_cli()
            .try_get_matches_from([
                "ee2mac", "--iface", "end0", "--eeprom", "/e", "--offset", "250", "-v",
            ])
            .unwrap();
        assert_eq!(matches.get_one::<String>("iface").unwrap(), "end0");
        assert!(matches.get_flag("debug"));
    }

    #[test]
    fn cli_rejects_unknown_flags() {
        assert!(build_cli().try_get_matches_from(["ee2mac", "-q"]).is_err());
    }

    #[test]
    fn confirmation_renders_two_digit_uppercase_pairs() {
        let mac = MacAddress::new([0xAA, 0xBB, 0xCC, 0x11, 0x22, 0x33]);
        assert_eq!(
            format!("MAC Address will be set to: {mac}"),
            "MAC Address will be set to: AA:BB:CC:11:22:33"
        );

        // high bytes stay two digits, low bytes keep their leading zero
        let mac = MacAddress::new([0xFF, 0x0A, 0x00, 0x80, 0x7F, 0x01]);
        assert_eq!(mac.to_string(), "FF:0A:00:80:7F:01");
    }
}
