//! Decode uploaded/captured audio bytes into 16kHz mono PCM.
//!
//! WAV payloads take a fast path through hound; everything else (MP3, WebM,
//! M4A, OGG, FLAC) goes through symphonia's probe-and-decode loop. Output is
//! always 16-bit mono at the engine sample rate, downmixed and resampled as
//! needed.

use std::io::Cursor;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::defaults::SAMPLE_RATE;
use crate::error::{LecnotesError, Result};

/// Decode arbitrary audio bytes to 16kHz mono i16 samples.
///
/// The declared MIME type is only a hint; the container is probed from the
/// bytes themselves, so a mislabeled payload still decodes when a decoder
/// recognizes it.
pub fn decode_to_speech_samples(bytes: &[u8], mime_type: &str) -> Result<Vec<i16>> {
    if bytes.is_empty() {
        return Err(LecnotesError::AudioDecode {
            message: "empty audio payload".to_string(),
        });
    }

    // RIFF magic → WAV fast path
    if bytes.len() >= 4 && &bytes[..4] == b"RIFF" {
        return decode_wav(bytes);
    }

    decode_with_symphonia(bytes, mime_type)
}

/// Decode a WAV payload with hound.
fn decode_wav(bytes: &[u8]) -> Result<Vec<i16>> {
    let reader = hound::WavReader::new(Cursor::new(bytes)).map_err(|e| {
        LecnotesError::AudioDecode {
            message: format!("Failed to parse WAV data: {}", e),
        }
    })?;

    let spec = reader.spec();
    let source_rate = spec.sample_rate;
    let source_channels = spec.channels as usize;

    let raw_samples: Vec<i16> = reader
        .into_samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| LecnotesError::AudioDecode {
            message: format!("Failed to read WAV samples: {}", e),
        })?;

    Ok(to_speech_rate(&raw_samples, source_channels, source_rate))
}

/// Decode any symphonia-supported container/codec.
fn decode_with_symphonia(bytes: &[u8], mime_type: &str) -> Result<Vec<i16>> {
    let mss = MediaSourceStream::new(
        Box::new(Cursor::new(bytes.to_vec())),
        Default::default(),
    );

    let mut hint = Hint::new();
    if !mime_type.is_empty() {
        hint.mime_type(mime_type);
    }
    if let Some(ext) = extension_for_mime(mime_type) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| LecnotesError::AudioFormatUnsupported {
            message: format!("no container format recognized: {}", e),
        })?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| LecnotesError::AudioFormatUnsupported {
            message: "no decodable audio track".to_string(),
        })?;
    let track_id = track.id;
    let source_rate = track.codec_params.sample_rate.unwrap_or(SAMPLE_RATE);
    let source_channels = track
        .codec_params
        .channels
        .map(|c| c.count())
        .unwrap_or(1)
        .max(1);

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| LecnotesError::AudioFormatUnsupported {
            message: format!("no decoder for codec: {}", e),
        })?;

    let mut samples: Vec<i16> = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            // End of stream is signaled as an I/O EOF
            Err(SymphoniaError::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => {
                return Err(LecnotesError::AudioDecode {
                    message: format!("failed to read packet: {}", e),
                });
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let mut buf =
                    SampleBuffer::<i16>::new(decoded.capacity() as u64, *decoded.spec());
                buf.copy_interleaved_ref(decoded);
                samples.extend_from_slice(buf.samples());
            }
            // Recoverable corruption in one packet; keep going
            Err(SymphoniaError::DecodeError(_)) => continue,
            Err(e) => {
                return Err(LecnotesError::AudioDecode {
                    message: format!("decoder failed: {}", e),
                });
            }
        }
    }

    if samples.is_empty() {
        return Err(LecnotesError::AudioDecode {
            message: "no audio samples decoded".to_string(),
        });
    }

    Ok(to_speech_rate(&samples, source_channels, source_rate))
}

/// Downmix interleaved samples to mono and resample to the engine rate.
fn to_speech_rate(samples: &[i16], channels: usize, source_rate: u32) -> Vec<i16> {
    let mono = if channels > 1 {
        samples
            .chunks_exact(channels)
            .map(|frame| {
                let sum: i32 = frame.iter().map(|&s| s as i32).sum();
                (sum / channels as i32) as i16
            })
            .collect()
    } else {
        samples.to_vec()
    };

    if source_rate == SAMPLE_RATE {
        mono
    } else {
        resample(&mono, source_rate, SAMPLE_RATE)
    }
}

/// Simple linear interpolation resampling.
fn resample(samples: &[i16], from_rate: u32, to_rate: u32) -> Vec<i16> {
    if from_rate == to_rate || samples.is_empty() {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let output_len = (samples.len() as f64 / ratio).ceil() as usize;

    (0..output_len)
        .map(|i| {
            let source_pos = i as f64 * ratio;
            let source_idx = source_pos.floor() as usize;
            let fraction = source_pos - source_idx as f64;

            if source_idx + 1 >= samples.len() {
                samples[samples.len() - 1]
            } else {
                let left = samples[source_idx] as f64;
                let right = samples[source_idx + 1] as f64;
                (left + (right - left) * fraction) as i16
            }
        })
        .collect()
}

/// Map a declared MIME type to the file extension symphonia keys its probe on.
fn extension_for_mime(mime_type: &str) -> Option<&'static str> {
    match mime_type {
        "audio/wav" | "audio/x-wav" => Some("wav"),
        "audio/mpeg" | "audio/mp3" => Some("mp3"),
        "audio/webm" | "video/webm" => Some("webm"),
        "audio/mp4" | "audio/m4a" | "audio/x-m4a" => Some("m4a"),
        "audio/ogg" | "application/ogg" => Some("ogg"),
        "audio/flac" | "audio/x-flac" => Some("flac"),
        _ => None,
    }
}
