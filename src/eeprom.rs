/*
 *  eeprom.rs
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
//! Pulls the MAC address out of an EEPROM device node.
//!
//! AT24MACxxx and 24AAxxE48 parts expose their factory EUI through the same
//! byte-addressable node as the rest of the array; the caller supplies the
//! part-specific offset. The six bytes come back verbatim, with no
//! multicast or locally-administered bit checks.

use log::debug;
use mac_address::MacAddress;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Octets in an EUI-48 hardware address.
pub const ETH_ALEN: usize = 6;

#[derive(Debug, Error)]
pub enum EepromError {
    #[error("cannot open EEPROM node {path}: {source}")]
    Open { path: PathBuf, source: io::Error },
    #[error("cannot seek to EEPROM offset {offset:#x}: {source}")]
    Seek { offset: u64, source: io::Error },
    #[error("read failed at EEPROM offset {offset:#x}: {source}")]
    Read { offset: u64, source: io::Error },
    #[error("EEPROM held {got} of 6 MAC bytes at offset {offset:#x}")]
    ShortRead { offset: u64, got: usize },
}

/// Reads the six MAC bytes stored at `offset` within the EEPROM node.
///
/// Seeking past EOF succeeds on regular files, so a short read is the only
/// signal that the offset or the device size is wrong; anything less than
/// six bytes is an error, never a partial address.
pub fn read_mac(path: &Path, offset: u64) -> Result<MacAddress, EepromError> {
    let mut file = File::open(path).map_err(|source| EepromError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    file.seek(SeekFrom::Start(offset))
        .map_err(|source| EepromError::Seek { offset, source })?;

    let mut mac = [0u8; ETH_ALEN];
    let mut got = 0;
    while got < ETH_ALEN {
        match file.read(&mut mac[got..]) {
            Ok(0) => return Err(EepromError::ShortRead { offset, got }),
            Ok(n) => got += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => return Err(EepromError::Read { offset, source }),
        }
    }

    debug!("{} offset {:#x}: {:02X?}", path.display(), offset, mac);
    Ok(MacAddress::new(mac))
}
