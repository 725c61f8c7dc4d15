//! Sprite decoding and kitty graphics sequences.

use std::io::Cursor;

use base64::{engine::general_purpose, Engine as _};
use image::{codecs::gif::GifDecoder, AnimationDecoder, GenericImageView};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Kitty `f=` value for raw RGBA frames.
const FORMAT_RGBA: u32 = 32;
/// Kitty `f=` value for PNG payloads.
const FORMAT_PNG: u32 = 100;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpriteFrame {
    /// Base64 pixel data in the encoding named by `format`.
    pub payload: String,
    pub width: u32,
    pub height: u32,
    pub format: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpriteData {
    pub frames: Vec<SpriteFrame>,
    pub width: u32,
    pub height: u32,
}

impl SpriteData {
    /// Frame at `index`, wrapping around the animation.
    pub fn frame(&self, index: usize) -> Option<&SpriteFrame> {
        if self.frames.is_empty() {
            return None;
        }
        Some(&self.frames[index % self.frames.len()])
    }
}

/// Decode sprite bytes into renderable frames. Animated GIFs keep every
/// frame; anything else becomes a single still.
pub fn decode_sprite(bytes: &[u8], url: &str) -> Result<SpriteData, String> {
    if looks_like_gif(bytes, url) {
        if let Some(sprite) = decode_gif(bytes)? {
            return Ok(sprite);
        }
    }
    decode_still(bytes)
}

fn decode_gif(bytes: &[u8]) -> Result<Option<SpriteData>, String> {
    let decoder = GifDecoder::new(Cursor::new(bytes)).map_err(|err| err.to_string())?;
    let frames = decoder
        .into_frames()
        .collect_frames()
        .map_err(|err| err.to_string())?;

    let mut sprite_frames = Vec::with_capacity(frames.len());
    for frame in frames {
        let buffer = frame.into_buffer();
        let (width, height) = buffer.dimensions();
        sprite_frames.push(SpriteFrame {
            payload: general_purpose::STANDARD.encode(buffer.as_raw()),
            width,
            height,
            format: FORMAT_RGBA,
        });
    }

    let Some(first) = sprite_frames.first() else {
        return Ok(None);
    };
    let (width, height) = (first.width, first.height);
    Ok(Some(SpriteData {
        frames: sprite_frames,
        width,
        height,
    }))
}

fn decode_still(bytes: &[u8]) -> Result<SpriteData, String> {
    let image = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let (width, height) = image.dimensions();
    Ok(SpriteData {
        frames: vec![SpriteFrame {
            payload: general_purpose::STANDARD.encode(bytes),
            width,
            height,
            format: FORMAT_PNG,
        }],
        width,
        height,
    })
}

/// Kitty transmit-and-display escape sequence for one frame, scaled to
/// `cols` x `rows` terminal cells.
pub fn kitty_sequence(frame: &SpriteFrame, cols: u16, rows: u16) -> Result<String, String> {
    let mut sequence = String::new();
    let payload = frame.payload.as_bytes();
    let chunk_size = 4096;
    let total_chunks = (payload.len() + chunk_size - 1) / chunk_size;

    for (index, chunk) in payload.chunks(chunk_size).enumerate() {
        let more = if index + 1 < total_chunks { 1 } else { 0 };
        let chunk_str = std::str::from_utf8(chunk).map_err(|err| err.to_string())?;
        if index == 0 {
            let mut params = format!(
                "f={},s={},v={},a=T,t=d",
                frame.format, frame.width, frame.height
            );
            if cols > 0 {
                params.push_str(&format!(",c={cols}"));
            }
            if rows > 0 {
                params.push_str(&format!(",r={rows}"));
            }
            params.push_str(&format!(",m={more}"));
            sequence.push_str(&format!("\x1b_G{params};{chunk_str}\x1b\\"));
        } else {
            sequence.push_str(&format!("\x1b_Gm={more};{chunk_str}\x1b\\"));
        }
    }
    Ok(sequence)
}

fn looks_like_gif(bytes: &[u8], url: &str) -> bool {
    if url.ends_with(".gif") {
        return true;
    }
    bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(payload: &str) -> SpriteFrame {
        SpriteFrame {
            payload: payload.to_string(),
            width: 2,
            height: 2,
            format: FORMAT_RGBA,
        }
    }

    #[test]
    fn frame_index_wraps_around() {
        let sprite = SpriteData {
            frames: vec![frame("a"), frame("b"), frame("c")],
            width: 2,
            height: 2,
        };
        assert_eq!(sprite.frame(0).unwrap().payload, "a");
        assert_eq!(sprite.frame(4).unwrap().payload, "b");
        assert!(SpriteData {
            frames: vec![],
            width: 0,
            height: 0
        }
        .frame(0)
        .is_none());
    }

    #[test]
    fn kitty_sequence_carries_format_and_size() {
        let sequence = kitty_sequence(&frame("AAAA"), 4, 2).unwrap();
        assert!(sequence.starts_with("\x1b_Gf=32,s=2,v=2,a=T,t=d,c=4,r=2,m=0;"));
        assert!(sequence.ends_with("\x1b\\"));
    }

    #[test]
    fn gif_magic_is_recognized() {
        assert!(looks_like_gif(b"GIF89a....", "https://img.example/x"));
        assert!(looks_like_gif(b"....", "https://img.example/25.gif"));
        assert!(!looks_like_gif(b"\x89PNG", "https://img.example/25.png"));
    }
}
