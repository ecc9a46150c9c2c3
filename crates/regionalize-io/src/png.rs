//! PNG codec
//!
//! Gray images keep their bit depth. Everything with color or alpha
//! becomes a 32 bpp raster; palettes are expanded and 16-bit color
//! channels are cut to their high byte. Single-sample 32 bpp rasters
//! (region labels) are stored as 8-bit RGBA, one label byte per channel,
//! so no label bits are lost.

use crate::{IoError, IoResult};
use png::{BitDepth, ColorType, Decoder, Encoder};
use regionalize_core::{Pix, PixelDepth, color};
use std::io::{BufRead, Seek, Write};

/// Bit offset of the `x`-th sub-byte sample inside its byte.
#[inline]
fn sub_byte_shift(x: u32, bits: u32) -> u32 {
    8 - bits * (x % (8 / bits) + 1)
}

/// Gray or palette index sample `x` of a packed row.
fn packed_sample(row: &[u8], x: u32, bits: u32) -> u32 {
    match bits {
        16 => u32::from(u16::from_be_bytes([row[2 * x as usize], row[2 * x as usize + 1]])),
        8 => u32::from(row[x as usize]),
        _ => {
            let byte = row[(x / (8 / bits)) as usize];
            u32::from(byte >> sub_byte_shift(x, bits)) & ((1 << bits) - 1)
        }
    }
}

fn target_layout(color: ColorType, bits: BitDepth) -> (PixelDepth, u32) {
    match (color, bits) {
        (ColorType::Grayscale, BitDepth::One) => (PixelDepth::Bit1, 1),
        (ColorType::Grayscale, BitDepth::Two) => (PixelDepth::Bit2, 1),
        (ColorType::Grayscale, BitDepth::Four) => (PixelDepth::Bit4, 1),
        (ColorType::Grayscale, BitDepth::Eight) => (PixelDepth::Bit8, 1),
        (ColorType::Grayscale, BitDepth::Sixteen) => (PixelDepth::Bit16, 1),
        (ColorType::Rgb | ColorType::Indexed, _) => (PixelDepth::Bit32, 3),
        (ColorType::GrayscaleAlpha | ColorType::Rgba, _) => (PixelDepth::Bit32, 4),
    }
}

/// Decode pixel `x` of a row of direct color samples into `0xRRGGBBAA`.
fn color_sample(row: &[u8], x: u32, color: ColorType, wide: bool) -> u32 {
    let channels = color.samples();
    let stride = if wide { 2 } else { 1 };
    let at = |c: usize| row[(x as usize * channels + c) * stride];
    match color {
        ColorType::GrayscaleAlpha => color::compose_rgba(at(0), at(0), at(0), at(1)),
        ColorType::Rgb => color::compose_rgb(at(0), at(1), at(2)),
        _ => color::compose_rgba(at(0), at(1), at(2), at(3)),
    }
}

/// Decode a PNG stream.
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut reader = Decoder::new(reader)
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("png header: {e}")))?;

    let info = reader.info();
    let (width, height) = (info.width, info.height);
    let palette = info.palette.as_ref().map(|p| p.to_vec());
    let (color, bits) = reader.output_color_type();
    if color == ColorType::Indexed && palette.is_none() {
        return Err(IoError::InvalidData("indexed png has no palette".into()));
    }

    let size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("png frame too large".into()))?;
    let mut buf = vec![0; size];
    let frame = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("png frame: {e}")))?;

    let (depth, spp) = target_layout(color, bits);
    let mut out = Pix::new(width, height, depth)?.to_mut();
    out.set_spp(spp);

    let bit_count = bits as u32;
    for (y, row) in buf.chunks(frame.line_size).take(height as usize).enumerate() {
        let y = y as u32;
        for x in 0..width {
            let value = match color {
                ColorType::Grayscale => packed_sample(row, x, bit_count),
                ColorType::Indexed => {
                    let index = packed_sample(row, x, bit_count) as usize;
                    let rgb = palette
                        .as_deref()
                        .and_then(|p| p.get(3 * index..3 * index + 3))
                        .ok_or_else(|| {
                            IoError::InvalidData(format!("palette has no entry {index}"))
                        })?;
                    color::compose_rgb(rgb[0], rgb[1], rgb[2])
                }
                _ => color_sample(row, x, color, bits == BitDepth::Sixteen),
            };
            out.set_pixel_unchecked(x, y, value);
        }
    }
    Ok(out.into())
}

fn encoding_for(pix: &Pix) -> (ColorType, BitDepth) {
    match pix.depth() {
        PixelDepth::Bit1 => (ColorType::Grayscale, BitDepth::One),
        PixelDepth::Bit2 => (ColorType::Grayscale, BitDepth::Two),
        PixelDepth::Bit4 => (ColorType::Grayscale, BitDepth::Four),
        PixelDepth::Bit8 => (ColorType::Grayscale, BitDepth::Eight),
        PixelDepth::Bit16 => (ColorType::Grayscale, BitDepth::Sixteen),
        PixelDepth::Bit32 if pix.spp() == 3 => (ColorType::Rgb, BitDepth::Eight),
        PixelDepth::Bit32 => (ColorType::Rgba, BitDepth::Eight),
    }
}

/// Encode row `y` of `pix` into `out`, which must be zeroed.
fn encode_row(pix: &Pix, y: u32, color: ColorType, out: &mut [u8]) {
    let bits = pix.depth().bits();
    for x in 0..pix.width() {
        let value = pix.get_pixel_unchecked(x, y);
        let i = x as usize;
        match (color, bits) {
            (ColorType::Grayscale, 1 | 2 | 4) => {
                out[(x / (8 / bits)) as usize] |= (value as u8) << sub_byte_shift(x, bits);
            }
            (ColorType::Grayscale, 8) => out[i] = value as u8,
            (ColorType::Grayscale, _) => {
                out[2 * i..2 * i + 2].copy_from_slice(&(value as u16).to_be_bytes());
            }
            (ColorType::Rgb, _) => {
                let (r, g, b) = color::extract_rgb(value);
                out[3 * i..3 * i + 3].copy_from_slice(&[r, g, b]);
            }
            _ => out[4 * i..4 * i + 4].copy_from_slice(&value.to_be_bytes()),
        }
    }
}

/// Encode `pix` as PNG.
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let (color, bits) = encoding_for(pix);
    let mut encoder = Encoder::new(writer, pix.width(), pix.height());
    encoder.set_color(color);
    encoder.set_depth(bits);
    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("png header: {e}")))?;

    let line = (pix.width() as usize * color.samples() * bits as usize).div_ceil(8);
    let mut data = vec![0u8; line * pix.height() as usize];
    for (y, row) in data.chunks_mut(line).enumerate() {
        encode_row(pix, y as u32, color, row);
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("png data: {e}")))
}
