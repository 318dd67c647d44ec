// src/utils/wire.rs
use byteorder::{ByteOrder, LittleEndian};

/// Fixed-width little-endian field readers over a block slice.
///
/// Every accessor returns `None` when the field would run past the end of
/// the slice, so command parsers can treat a short event block as a
/// non-match instead of an error.
pub(crate) fn u8_at(buf: &[u8], offset: usize) -> Option<u8> {
    buf.get(offset).copied()
}

pub(crate) fn i16_at(buf: &[u8], offset: usize) -> Option<i16> {
    buf.get(offset..offset + 2).map(LittleEndian::read_i16)
}

pub(crate) fn u16_at(buf: &[u8], offset: usize) -> Option<u16> {
    buf.get(offset..offset + 2).map(LittleEndian::read_u16)
}

pub(crate) fn i32_at(buf: &[u8], offset: usize) -> Option<i32> {
    buf.get(offset..offset + 4).map(LittleEndian::read_i32)
}

pub(crate) fn u32_at(buf: &[u8], offset: usize) -> Option<u32> {
    buf.get(offset..offset + 4).map(LittleEndian::read_u32)
}

pub(crate) fn f32_at(buf: &[u8], offset: usize) -> Option<f32> {
    buf.get(offset..offset + 4).map(LittleEndian::read_f32)
}

pub(crate) fn f64_at(buf: &[u8], offset: usize) -> Option<f64> {
    buf.get(offset..offset + 8).map(LittleEndian::read_f64)
}

/// Read `N` consecutive little-endian i16 values starting at `offset`.
pub(crate) fn i16_array_at<const N: usize>(buf: &[u8], offset: usize) -> Option<[i16; N]> {
    let raw = buf.get(offset..offset + N * 2)?;
    let mut out = [0i16; N];
    LittleEndian::read_i16_into(raw, &mut out);
    Some(out)
}

/// Read `N` consecutive little-endian i32 values starting at `offset`.
pub(crate) fn i32_array_at<const N: usize>(buf: &[u8], offset: usize) -> Option<[i32; N]> {
    let raw = buf.get(offset..offset + N * 4)?;
    let mut out = [0i32; N];
    LittleEndian::read_i32_into(raw, &mut out);
    Some(out)
}

/// Read `N` consecutive little-endian f32 values starting at `offset`.
pub(crate) fn f32_array_at<const N: usize>(buf: &[u8], offset: usize) -> Option<[f32; N]> {
    let raw = buf.get(offset..offset + N * 4)?;
    let mut out = [0.0f32; N];
    LittleEndian::read_f32_into(raw, &mut out);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_reads() {
        let buf = [0x02, 0x00, 0xff, 0xff, 0x01, 0x00, 0x00, 0x00];
        assert_eq!(u16_at(&buf, 0), Some(2));
        assert_eq!(i16_at(&buf, 2), Some(-1));
        assert_eq!(u32_at(&buf, 4), Some(1));
        assert_eq!(u8_at(&buf, 7), Some(0));
    }

    #[test]
    fn test_out_of_bounds_is_none() {
        let buf = [0u8; 4];
        assert_eq!(i16_at(&buf, 3), None);
        assert_eq!(u32_at(&buf, 1), None);
        assert_eq!(f64_at(&buf, 0), None);
        assert_eq!(i16_array_at::<3>(&buf, 0), None);
    }

    #[test]
    fn test_array_reads() {
        let buf = [0x01, 0x00, 0x02, 0x00, 0x03, 0x00];
        assert_eq!(i16_array_at::<3>(&buf, 0), Some([1, 2, 3]));
    }
}
