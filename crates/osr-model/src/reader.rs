// Little-endian primitives used by the .osr layout.

use crate::DecodeError;

/// String marker for an absent/empty osu! string.
const STRING_EMPTY: u8 = 0x00;
/// String marker followed by a ULEB128 length and UTF-8 bytes.
const STRING_PRESENT: u8 = 0x0b;

/// Cursor over an in-memory replay file.
pub(crate) struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn read_bytes(
        &mut self,
        len: usize,
        field: &'static str,
    ) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < len {
            return Err(DecodeError::UnexpectedEof { field });
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn read_array<const N: usize>(
        &mut self,
        field: &'static str,
    ) -> Result<[u8; N], DecodeError> {
        let bytes = self.read_bytes(N, field)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn read_u8(&mut self, field: &'static str) -> Result<u8, DecodeError> {
        Ok(self.read_array::<1>(field)?[0])
    }

    pub fn read_u16(&mut self, field: &'static str) -> Result<u16, DecodeError> {
        Ok(u16::from_le_bytes(self.read_array(field)?))
    }

    pub fn read_i32(&mut self, field: &'static str) -> Result<i32, DecodeError> {
        Ok(i32::from_le_bytes(self.read_array(field)?))
    }

    pub fn read_i64(&mut self, field: &'static str) -> Result<i64, DecodeError> {
        Ok(i64::from_le_bytes(self.read_array(field)?))
    }

    pub fn read_uleb128(&mut self, field: &'static str) -> Result<u64, DecodeError> {
        let mut value = 0u64;
        let mut shift = 0u32;
        loop {
            let byte = self.read_u8(field)?;
            if shift < 64 {
                value |= u64::from(byte & 0x7f) << shift;
            }
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
    }

    /// Reads an osu! string: `0x00` for empty, or `0x0b` + ULEB128 length + UTF-8.
    pub fn read_string(&mut self, field: &'static str) -> Result<String, DecodeError> {
        match self.read_u8(field)? {
            STRING_EMPTY => Ok(String::new()),
            STRING_PRESENT => {
                let len = self.read_uleb128(field)?;
                let len =
                    usize::try_from(len).map_err(|_| DecodeError::UnexpectedEof { field })?;
                let bytes = self.read_bytes(len, field)?;
                String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidUtf8 { field })
            }
            marker => Err(DecodeError::InvalidString { field, marker }),
        }
    }
}

pub(crate) fn write_uleb128(out: &mut Vec<u8>, mut value: u64) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

pub(crate) fn write_string(out: &mut Vec<u8>, value: &str) {
    if value.is_empty() {
        out.push(STRING_EMPTY);
        return;
    }
    out.push(STRING_PRESENT);
    write_uleb128(out, value.len() as u64);
    out.extend_from_slice(value.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_primitives_little_endian() {
        let data = [0x03, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12];
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_u8("mode").unwrap(), 3);
        assert_eq!(reader.read_u16("count").unwrap(), 0x1234);
        assert_eq!(reader.read_i32("score").unwrap(), 0x1234_5678);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_read_past_end() {
        let data = [0x01, 0x02];
        let mut reader = ByteReader::new(&data);
        let err = reader.read_i32("version").unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedEof { field: "version" }));
    }

    #[test]
    fn test_uleb128_multibyte() {
        // 624485 is the canonical ULEB128 example.
        let data = [0xe5, 0x8e, 0x26];
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_uleb128("len").unwrap(), 624_485);

        let mut out = Vec::new();
        write_uleb128(&mut out, 624_485);
        assert_eq!(out, data);
    }

    #[test]
    fn test_read_strings() {
        let mut data = vec![STRING_EMPTY];
        write_string(&mut data, "peppy");
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_string("a").unwrap(), "");
        assert_eq!(reader.read_string("b").unwrap(), "peppy");
    }

    #[test]
    fn test_invalid_string_marker() {
        let data = [0x42];
        let mut reader = ByteReader::new(&data);
        let err = reader.read_string("player").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidString {
                field: "player",
                marker: 0x42
            }
        ));
    }

    #[test]
    fn test_invalid_utf8() {
        let data = [STRING_PRESENT, 0x02, 0xff, 0xfe];
        let mut reader = ByteReader::new(&data);
        assert!(matches!(
            reader.read_string("player"),
            Err(DecodeError::InvalidUtf8 { .. })
        ));
    }

    #[test]
    fn test_truncated_string() {
        let data = [STRING_PRESENT, 0x05, b'a'];
        let mut reader = ByteReader::new(&data);
        assert!(matches!(
            reader.read_string("player"),
            Err(DecodeError::UnexpectedEof { .. })
        ));
    }
}
