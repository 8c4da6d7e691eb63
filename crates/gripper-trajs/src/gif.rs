//! Animated GIF assembly from rendered trajectory frames.
//!
//! Walks an evaluation output root (one directory per sequence, trajectory
//! frames under `<sequence>/trajs/`), groups the frames by camera tag,
//! orders them naturally (`img_2` before `img_10`) and writes one looping
//! GIF per (sequence, camera).

use std::cmp::Ordering;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame};
use log::{info, warn};

#[derive(thiserror::Error, Debug)]
pub enum GifError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Settings for GIF assembly.
#[derive(Clone, Debug)]
pub struct GifConfig {
    /// Evaluation output root (`<root>/<sequence>/trajs/*.jpg`).
    pub eval_root: PathBuf,
    /// Destination directory for the GIFs.
    pub dest: PathBuf,
    /// Per-frame display time in milliseconds.
    pub frame_delay_ms: u32,
}

impl GifConfig {
    pub fn new(eval_root: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self {
            eval_root: eval_root.into(),
            dest: dest.into(),
            frame_delay_ms: 200,
        }
    }
}

/// Compare strings with embedded numbers by numeric value.
///
/// Digit runs compare as integers (longer runs of equal value fall back to
/// their text form), everything else byte-wise, so `img_2 < img_10`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ai = a.chars().peekable();
    let mut bi = b.chars().peekable();

    loop {
        match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ca), Some(cb)) => {
                if ca.is_ascii_digit() && cb.is_ascii_digit() {
                    let mut na = String::new();
                    while let Some(c) = ai.peek().copied().filter(char::is_ascii_digit) {
                        na.push(c);
                        ai.next();
                    }
                    let mut nb = String::new();
                    while let Some(c) = bi.peek().copied().filter(char::is_ascii_digit) {
                        nb.push(c);
                        bi.next();
                    }
                    let va: u128 = na.parse().unwrap_or(u128::MAX);
                    let vb: u128 = nb.parse().unwrap_or(u128::MAX);
                    match va.cmp(&vb).then_with(|| na.cmp(&nb)) {
                        Ordering::Equal => {}
                        other => return other,
                    }
                } else {
                    match ca.cmp(&cb) {
                        Ordering::Equal => {
                            ai.next();
                            bi.next();
                        }
                        other => return other,
                    }
                }
            }
        }
    }
}

/// Extract the `cam_<n>` tag from a frame file name, if present.
pub fn camera_tag(file_name: &str) -> Option<String> {
    let start = file_name.find("cam_")?;
    let digits: String = file_name[start + 4..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    Some(format!("cam_{digits}"))
}

fn trajectory_frames(seq_dir: &Path) -> Result<Vec<PathBuf>, GifError> {
    let trajs = seq_dir.join("trajs");
    if !trajs.is_dir() {
        return Ok(Vec::new());
    }

    let mut frames: Vec<PathBuf> = fs::read_dir(&trajs)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|p| {
            p.extension()
                .is_some_and(|ext| ext == "jpg" || ext == "jpeg" || ext == "png")
        })
        .collect();
    frames.sort_by(|a, b| {
        natural_cmp(
            &a.file_name().unwrap_or_default().to_string_lossy(),
            &b.file_name().unwrap_or_default().to_string_lossy(),
        )
    });
    Ok(frames)
}

/// Encode `frames` (image files, already ordered) into a looping GIF.
pub fn encode_gif(
    frames: &[PathBuf],
    dest: impl AsRef<Path>,
    frame_delay_ms: u32,
) -> Result<(), GifError> {
    let file = File::create(dest)?;
    let mut encoder = GifEncoder::new(file);
    encoder.set_repeat(Repeat::Infinite)?;

    for path in frames {
        let img = image::open(path)?.to_rgba8();
        let frame = Frame::from_parts(img, 0, 0, Delay::from_numer_denom_ms(frame_delay_ms, 1));
        encoder.encode_frame(frame)?;
    }
    Ok(())
}

/// Assemble one GIF per (sequence, camera) under the evaluation root.
///
/// Returns the number of GIFs written. Sequences without trajectory frames
/// are skipped with a warning.
pub fn build_gifs(config: &GifConfig) -> Result<usize, GifError> {
    let mut seq_dirs: Vec<PathBuf> = fs::read_dir(&config.eval_root)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|p| p.is_dir())
        .collect();
    seq_dirs.sort_by(|a, b| {
        natural_cmp(
            &a.file_name().unwrap_or_default().to_string_lossy(),
            &b.file_name().unwrap_or_default().to_string_lossy(),
        )
    });

    fs::create_dir_all(&config.dest)?;

    let mut written = 0;
    for seq_dir in seq_dirs {
        let seq_name = seq_dir
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned();
        let frames = trajectory_frames(&seq_dir)?;
        if frames.is_empty() {
            warn!("{seq_name}: no trajectory frames, skipping");
            continue;
        }

        // Group per camera; frames without a camera tag go into one group.
        let mut cameras: Vec<(Option<String>, Vec<PathBuf>)> = Vec::new();
        for frame in frames {
            let tag = frame
                .file_name()
                .and_then(|n| camera_tag(&n.to_string_lossy()));
            match cameras.iter_mut().find(|(t, _)| *t == tag) {
                Some((_, group)) => group.push(frame),
                None => cameras.push((tag, vec![frame])),
            }
        }

        for (tag, group) in cameras {
            let gif_name = match &tag {
                Some(tag) => format!("{seq_name}_{tag}.gif"),
                None => format!("{seq_name}.gif"),
            };
            let dest = config.dest.join(&gif_name);
            encode_gif(&group, &dest, config.frame_delay_ms)?;
            info!("wrote {} ({} frames)", dest.display(), group.len());
            written += 1;
        }
    }
    Ok(written)
}
