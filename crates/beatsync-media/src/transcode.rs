//! Vertical crop transcode.
//!
//! Turns a landscape clip into its portrait rendition by center-cropping the
//! video track to 9:16. The audio track is copied through unchanged.

use std::path::Path;
use tracing::{debug, info};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Center crop to 9:16 (width = input height * 9/16, full input height).
/// FFmpeg anchors the crop window at the frame center when offsets are omitted.
pub const CROP_VERTICAL_FILTER: &str = "crop=ih*9/16:ih";

/// Crop a clip to a centered 9:16 portrait rendition.
///
/// Fails with [`MediaError::Timeout`] and kills the encoder process if it
/// runs longer than `timeout_secs`. The caller owns cleanup of `output` on
/// failure; a partial file may exist at that path.
pub async fn crop_vertical(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    timeout_secs: u64,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }

    let cmd = FfmpegCommand::new(input, output)
        .video_filter(CROP_VERTICAL_FILTER)
        .video_codec("libx264")
        .preset("veryfast")
        .crf(23)
        .audio_codec("copy")
        .output_args(["-movflags", "+faststart"]);

    debug!(
        input = %input.display(),
        output = %output.display(),
        "Cropping video to 9:16"
    );

    FfmpegRunner::new()
        .with_timeout(timeout_secs)
        .run(&cmd)
        .await?;

    info!(output = %output.display(), "Crop transcode complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_crop_filter_geometry() {
        assert_eq!(CROP_VERTICAL_FILTER, "crop=ih*9/16:ih");
    }

    #[tokio::test]
    async fn test_crop_vertical_missing_input() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out.mp4");

        let err = crop_vertical(dir.path().join("missing.mp4"), &out, 5)
            .await
            .unwrap_err();

        assert!(matches!(err, MediaError::FileNotFound(_)));
        assert!(!out.exists());
    }

    #[tokio::test]
    #[ignore = "requires ffmpeg"]
    async fn test_crop_vertical_produces_portrait_geometry() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src.mp4");
        let out = dir.path().join("out.mp4");

        // Synthesize a landscape source at the provider's default geometry.
        let status = tokio::process::Command::new("ffmpeg")
            .args([
                "-y",
                "-v",
                "error",
                "-f",
                "lavfi",
                "-i",
                "testsrc=duration=1:size=1344x768:rate=24",
                "-pix_fmt",
                "yuv420p",
            ])
            .arg(&src)
            .status()
            .await
            .unwrap();
        assert!(status.success());

        crop_vertical(&src, &out, 120).await.unwrap();

        let info = crate::probe::probe_video(&out).await.unwrap();
        assert_eq!(info.width, 432); // 768 * 9 / 16
        assert_eq!(info.height, 768);
    }
}
