/*
 *  netif.rs
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
//! Network interface status probe and hardware-address assignment via
//! `/sys/class/net` and the `SIOCSIFHWADDR` ioctl.

use crate::eeprom::ETH_ALEN;
use log::debug;
use mac_address::MacAddress;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Root of the kernel's per-interface attribute tree.
const SYSFS_NET: &str = "/sys/class/net";

/// The probe reads at most this many bytes; `down` fills them exactly.
const OPERSTATE_PROBE_LEN: usize = 4;

/// What the operstate probe saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperState {
    /// The status file read back exactly `down`.
    Down,
    /// The status file was readable but empty.
    Unknown,
    /// Anything else: `up`, `dormant`, truncated content, ...
    Other(String),
}

/// `/sys/class/net/<name>/operstate`
pub fn operstate_path(name: &str) -> PathBuf {
    Path::new(SYSFS_NET).join(name).join("operstate")
}

/// Single short read of an interface status file.
///
/// Only content that is exactly `down` counts as down. The MAC must not be
/// rewritten under a live interface, so every other answer, including a
/// truncated one, is reported as [`OperState::Other`] and rejected upstream.
pub fn probe_operstate(path: &Path) -> io::Result<OperState> {
    let mut file = File::open(path)?;

    let mut buf = [0u8; OPERSTATE_PROBE_LEN];
    let n = loop {
        match file.read(&mut buf) {
            Ok(n) => break n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    };

    Ok(match &buf[..n] {
        b"" => OperState::Unknown,
        b"down" => OperState::Down,
        other => OperState::Other(String::from_utf8_lossy(other).trim_end().to_string()),
    })
}

#[derive(Debug, Error)]
pub enum NetifError {
    #[error("interface name {0:?} does not fit in IFNAMSIZ")]
    NameTooLong(String),
    #[error("cannot open configuration socket: {0}")]
    Socket(io::Error),
    #[error("SIOCSIFHWADDR({name}): {source}")]
    Ioctl { name: String, source: io::Error },
}

/// Assigns `mac` to the named interface via `SIOCSIFHWADDR`.
///
/// The kernel takes this request on any ordinary datagram socket; the socket
/// carries no traffic and is closed on every path. Needs CAP_NET_ADMIN.
pub fn set_hwaddr(name: &str, mac: &MacAddress) -> Result<(), NetifError> {
    // ifr_name must keep a trailing NUL
    if name.len() >= libc::IFNAMSIZ {
        return Err(NetifError::NameTooLong(name.to_string()));
    }

    unsafe {
        let sock = libc::socket(libc::AF_INET, libc::SOCK_DGRAM, 0);
        if sock < 0 {
            return Err(NetifError::Socket(io::Error::last_os_error()));
        }

        let mut req: libc::ifreq = std::mem::zeroed();
        for (dst, src) in req.ifr_name.iter_mut().zip(name.as_bytes()) {
            *dst = *src as libc::c_char;
        }
        req.ifr_ifru.ifru_hwaddr.sa_family = libc::ARPHRD_ETHER as libc::sa_family_t;
        for (dst, src) in req.ifr_ifru.ifru_hwaddr.sa_data[..ETH_ALEN]
            .iter_mut()
            .zip(mac.bytes())
        {
            *dst = src as libc::c_char;
        }

        if libc::ioctl(sock, libc::SIOCSIFHWADDR, &req) < 0 {
            let source = io::Error::last_os_error();
            libc::close(sock);
            return Err(NetifError::Ioctl {
                name: name.to_string(),
                source,
            });
        }
        libc::close(sock);
    }

    debug!("{name} hardware address set to {mac}");
    Ok(())
}
