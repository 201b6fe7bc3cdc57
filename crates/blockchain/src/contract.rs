//! Soroban contract identifiers

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Strkey version byte for contracts (`C...`)
const CONTRACT_VERSION_BYTE: u8 = 2 << 3;
/// Encoded strkey length for 32-byte payloads
const STRKEY_LEN: usize = 56;
const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// A checksummed Stellar contract address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ContractId(String);

impl ContractId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ContractId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != STRKEY_LEN {
            return Err(format!(
                "Contract id must be {} characters, got {}",
                STRKEY_LEN,
                s.len()
            ));
        }
        if !s.starts_with('C') {
            return Err("Contract id must start with 'C'".to_string());
        }

        let raw = decode_base32(s).ok_or_else(|| "Contract id is not valid base32".to_string())?;
        let (body, checksum) = raw.split_at(raw.len() - 2);

        if body[0] != CONTRACT_VERSION_BYTE {
            return Err("Contract id has the wrong version byte".to_string());
        }
        if crc16_xmodem(body).to_le_bytes() != [checksum[0], checksum[1]] {
            return Err("Contract id checksum mismatch".to_string());
        }

        Ok(ContractId(s.to_string()))
    }
}

/// RFC 4648 base32 without padding
fn decode_base32(input: &str) -> Option<Vec<u8>> {
    let mut out = Vec::with_capacity(input.len() * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits = 0;

    for c in input.bytes() {
        let value = BASE32_ALPHABET.iter().position(|&a| a == c)? as u32;
        buffer = (buffer << 5) | value;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push((buffer >> bits) as u8);
            buffer &= (1 << bits) - 1;
        }
    }

    Some(out)
}

fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= u16::from(byte) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}
