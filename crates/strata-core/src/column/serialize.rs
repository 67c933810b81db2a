//! Per-column byte codec.
//!
//! Numeric payloads are a contiguous little-endian dump of the native
//! representation, one element after another. String payloads are a
//! sequence of `u32` little-endian length prefixes followed by UTF-8
//! bytes, one record per element; the null sentinel serializes as a
//! zero-length record.
use strata_error::{strata_bail, strata_ensure, StrataResult};

use super::Column;

macro_rules! impl_numeric_codec {
    ($native:ty) => {
        impl Column<$native> {
            pub fn to_bytes(&self) -> Vec<u8> {
                let mut buf = Vec::with_capacity(self.len() * size_of::<$native>());
                for v in self.iter() {
                    buf.extend_from_slice(&v.to_le_bytes());
                }
                buf
            }

            pub fn from_bytes(bytes: &[u8]) -> StrataResult<Self> {
                strata_ensure!(
                    !bytes.is_empty(),
                    ComputeError: "cannot deserialize a column from empty bytes"
                );
                const WIDTH: usize = size_of::<$native>();
                strata_ensure!(
                    bytes.len() % WIDTH == 0,
                    ComputeError: "invalid payload length {} for a {}-byte element type",
                    bytes.len(), WIDTH
                );
                let values = bytes
                    .chunks_exact(WIDTH)
                    .map(|chunk| <$native>::from_le_bytes(chunk.try_into().unwrap()))
                    .collect();
                Ok(Column::from_values(values))
            }
        }
    };
}

impl_numeric_codec!(i64);
impl_numeric_codec!(f64);

impl Column<String> {
    pub fn to_bytes(&self) -> Vec<u8> {
        let total: usize = self.iter().map(|v| size_of::<u32>() + v.len()).sum();
        let mut buf = Vec::with_capacity(total);
        for v in self.iter() {
            buf.extend_from_slice(&(v.len() as u32).to_le_bytes());
            buf.extend_from_slice(v.as_bytes());
        }
        buf
    }

    pub fn from_bytes(bytes: &[u8]) -> StrataResult<Self> {
        strata_ensure!(
            !bytes.is_empty(),
            ComputeError: "cannot deserialize a column from empty bytes"
        );
        let mut values = Vec::new();
        let mut offset = 0;
        while offset < bytes.len() {
            let Some(prefix) = bytes.get(offset..offset + size_of::<u32>()) else {
                strata_bail!(ComputeError: "truncated data: cannot read string length");
            };
            let len = u32::from_le_bytes(prefix.try_into().unwrap()) as usize;
            offset += size_of::<u32>();

            let Some(body) = bytes.get(offset..offset + len) else {
                strata_bail!(ComputeError: "truncated data: cannot read string data");
            };
            let value = std::str::from_utf8(body)
                .map_err(|_| {
                    strata_error::strata_err!(
                        ComputeError: "string column payload is not valid utf-8"
                    )
                })?
                .to_string();
            values.push(value);
            offset += len;
        }
        Ok(Column::from_values(values))
    }
}
