// konverty-core/tests/common/mod.rs
//
// Scripted stand-ins for ffmpeg and ffprobe shared by the integration tests.

#![allow(dead_code)]

use konverty_core::error::{CoreResult, command_start_error};
use konverty_core::external::{FfmpegProcess, FfmpegSpawner, FfprobeExecutor, command_args};
use konverty_core::metrics::FrameTotal;

use ffmpeg_sidecar::command::FfmpegCommand;
use std::io::{self, Cursor, Read};
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::sync::Mutex;

/// Exit status for a process that exited normally with `code`.
pub fn exit_status(code: i32) -> ExitStatus {
    ExitStatus::from_raw(code << 8)
}

/// A process whose stderr and exit status are fixed up front.
pub struct ScriptedProcess {
    stderr: Option<Vec<u8>>,
    status: ExitStatus,
}

impl FfmpegProcess for ScriptedProcess {
    fn take_stderr(&mut self) -> Option<Box<dyn Read + Send>> {
        self.stderr
            .take()
            .map(|bytes| Box::new(Cursor::new(bytes)) as Box<dyn Read + Send>)
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        Ok(self.status)
    }
}

enum Script {
    Run { stderr: Vec<u8>, exit_code: i32 },
    NoStderr,
    SpawnFails,
}

/// Spawner that records every command line and plays back one script.
pub struct ScriptedSpawner {
    script: Script,
    calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedSpawner {
    pub fn new(stderr: impl Into<Vec<u8>>, exit_code: i32) -> Self {
        Self::with_script(Script::Run {
            stderr: stderr.into(),
            exit_code,
        })
    }

    pub fn without_stderr() -> Self {
        Self::with_script(Script::NoStderr)
    }

    pub fn failing() -> Self {
        Self::with_script(Script::SpawnFails)
    }

    fn with_script(script: Script) -> Self {
        Self {
            script,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

impl FfmpegSpawner for ScriptedSpawner {
    type Process = ScriptedProcess;

    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        self.calls.lock().unwrap().push(command_args(&cmd));
        match &self.script {
            Script::Run { stderr, exit_code } => Ok(ScriptedProcess {
                stderr: Some(stderr.clone()),
                status: exit_status(*exit_code),
            }),
            Script::NoStderr => Ok(ScriptedProcess {
                stderr: None,
                status: exit_status(0),
            }),
            Script::SpawnFails => Err(command_start_error(
                "ffmpeg",
                io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
            )),
        }
    }
}

/// ffprobe stand-in answering every query with fixed values.
#[derive(Default)]
pub struct FixedProbe {
    pub frame_total: FrameTotal,
    pub bitrate_kbps: Option<u64>,
    pub codec: Option<String>,
    probed: Mutex<Vec<PathBuf>>,
}

impl FixedProbe {
    pub fn with_frames(total: u64) -> Self {
        Self {
            frame_total: FrameTotal::Known(total),
            ..Default::default()
        }
    }

    pub fn probed(&self) -> Vec<PathBuf> {
        self.probed.lock().unwrap().clone()
    }
}

impl FfprobeExecutor for FixedProbe {
    fn audio_bitrate_kbps(&self, _input_path: &Path) -> Option<u64> {
        self.bitrate_kbps
    }

    fn audio_codec(&self, _input_path: &Path) -> Option<String> {
        self.codec.clone()
    }

    fn frame_total(&self, input_path: &Path) -> FrameTotal {
        self.probed.lock().unwrap().push(input_path.to_path_buf());
        self.frame_total
    }
}

/// A progress line as ffmpeg prints it with `-stats`.
pub fn progress_line(frame: u64, time: &str) -> String {
    format!(
        "frame={frame:5} fps= 30 q=-0.0 size=N/A time={time} bitrate=N/A speed=1.02x"
    )
}

pub const PSNR_LINE: &str = "[Parsed_psnr_0 @ 0x5581] PSNR y:38.914521 u:42.100000 v:41.900000 average:39.812345 min:35.123456 max:44.654321";
