use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum SampleError {
    // 输入文件
    FileNotFound(PathBuf),
    FileAccess(std::io::Error),
    MapFailed(std::io::Error),
    StdinUnsupported,

    // 偏移量存储
    Allocation(usize),

    // 配置
    InvalidConfig(String),

    // 输出
    Output(std::io::Error),
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::FileNotFound(path) => write!(f, "File not found: {}", path.display()),
            Self::FileAccess(e) => write!(f, "File access error: {}", e),
            Self::MapFailed(e) => write!(f, "Could not memory-map input file: {}", e),
            Self::StdinUnsupported => write!(f, "Standard input is not supported, give a file path"),
            Self::Allocation(slots) => {
                write!(f, "Could not allocate offset reservoir of {} slots", slots)
            }
            Self::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            Self::Output(e) => write!(f, "Output error: {}", e),
        }
    }
}

impl std::error::Error for SampleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileAccess(e) | Self::MapFailed(e) | Self::Output(e) => Some(e),
            _ => None,
        }
    }
}

impl SampleError {
    // Fast-fail: 配置错误用 2，其余一律 1
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidConfig(_) | Self::StdinUnsupported => 2,
            _ => 1,
        }
    }

    pub fn is_usage(&self) -> bool {
        self.exit_code() == 2
    }

    /// A closed downstream pipe (`sample big.txt | head`) is not a failure.
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, Self::Output(e) if e.kind() == std::io::ErrorKind::BrokenPipe)
    }
}

// 便捷的Result类型
pub type Result<T> = std::result::Result<T, SampleError>;
