// src/header.rs
use crate::error::{MpxError, Result};
use crate::utils::{decode_padded_str, f64_at, i32_at, u16_at};
use chrono::{NaiveDate, NaiveDateTime};

/// Decoded session header. Exactly one header block exists per capture.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionHeader {
    pub program_version: u16,
    /// Wall-clock start of the recording session.
    pub session_date_time: NaiveDateTime,
    pub minimum_acquisition_time: f64,
    pub maximum_acquisition_time: f64,
    pub erase_count: i32,
    pub data_format_version: u8,
    pub application_name: String,
    pub resource_version: String,
}

impl SessionHeader {
    /// Minimum header block length covering every fixed field, through the
    /// end of the resource version string at offset 55.
    pub const MIN_BLOCK_LEN: usize = 55;

    /// Decode the header block. `block` is the full block slice including
    /// the length/tag prefix; all offsets are relative to the block start.
    pub fn decode(block: &[u8], block_offset: usize) -> Result<Self> {
        if block.len() < Self::MIN_BLOCK_LEN {
            return Err(MpxError::MalformedBlock {
                offset: block_offset,
                reason: format!("header block too short ({} bytes)", block.len()),
            });
        }

        let hour = block[10];
        let minute = block[11];
        let second = block[12];
        let day = block[14];
        let month = block[15];
        let year = u16_at(block, 16).unwrap_or(0);

        let session_date_time = NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
            .and_then(|d| d.and_hms_opt(hour as u32, minute as u32, second as u32))
            .ok_or(MpxError::InvalidDateTime {
                year,
                month,
                day,
                hour,
                minute,
                second,
            })?;

        Ok(SessionHeader {
            program_version: u16_at(block, 8).unwrap_or(0),
            session_date_time,
            minimum_acquisition_time: f64_at(block, 20).unwrap_or(0.0),
            maximum_acquisition_time: f64_at(block, 28).unwrap_or(0.0),
            erase_count: i32_at(block, 36).unwrap_or(0),
            data_format_version: block[40],
            application_name: decode_padded_str(&block[41..51]),
            resource_version: decode_padded_str(&block[51..55]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::{ByteOrder, LittleEndian};

    fn header_block() -> Vec<u8> {
        let mut block = vec![0u8; 55];
        LittleEndian::write_u16(&mut block[0..2], 55);
        block[2] = b'h';
        LittleEndian::write_u16(&mut block[8..10], 2); // ProgramVersion
        block[10] = 14; // hour
        block[11] = 30; // minute
        block[12] = 5; // second
        block[14] = 17; // day
        block[15] = 6; // month
        LittleEndian::write_u16(&mut block[16..18], 2021); // year
        LittleEndian::write_f64(&mut block[20..28], 0.25);
        LittleEndian::write_f64(&mut block[28..36], 301.5);
        LittleEndian::write_i32(&mut block[36..40], 3);
        block[40] = 4; // DataFormatVersion
        block[41..41 + 5].copy_from_slice(b"Neuro");
        block[51..51 + 3].copy_from_slice(b"1.5");
        block
    }

    #[test]
    fn test_decode_header_fields() {
        let header = SessionHeader::decode(&header_block(), 0).unwrap();
        assert_eq!(header.program_version, 2);
        assert_eq!(
            header.session_date_time,
            NaiveDate::from_ymd_opt(2021, 6, 17)
                .unwrap()
                .and_hms_opt(14, 30, 5)
                .unwrap()
        );
        assert_eq!(header.minimum_acquisition_time, 0.25);
        assert_eq!(header.maximum_acquisition_time, 301.5);
        assert_eq!(header.erase_count, 3);
        assert_eq!(header.data_format_version, 4);
        assert_eq!(header.application_name, "Neuro");
        assert_eq!(header.resource_version, "1.5");
    }

    #[test]
    fn test_invalid_calendar_date_is_rejected() {
        let mut block = header_block();
        block[15] = 13; // month 13
        match SessionHeader::decode(&block, 0) {
            Err(MpxError::InvalidDateTime { month: 13, .. }) => {}
            other => panic!("expected InvalidDateTime, got {other:?}"),
        }
    }

    #[test]
    fn test_short_header_block_is_malformed() {
        let block = vec![0u8; 40];
        assert!(matches!(
            SessionHeader::decode(&block, 11),
            Err(MpxError::MalformedBlock { offset: 11, .. })
        ));
    }
}
