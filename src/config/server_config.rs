// ==========================================
// 步数报告服务 - 服务配置
// ==========================================
// 来源: 环境变量（未设置或无法解析时使用默认值）
// 目录: 暂存目录 + 按格式分区的归档目录（json/ csv/）
// ==========================================

use crate::domain::document::DocumentFormat;
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

/// 环境变量名
pub mod config_keys {
    pub const PORT: &str = "PORT";
    pub const BIND: &str = "STEP_REPORT_BIND";
    pub const DATA_DIR: &str = "STEP_REPORT_DATA_DIR";
    pub const STAGING_DIR: &str = "STEP_REPORT_STAGING_DIR";
    pub const ARCHIVE_DIR: &str = "STEP_REPORT_ARCHIVE_DIR";
    pub const MAX_UPLOAD_BYTES: &str = "STEP_REPORT_MAX_UPLOAD_BYTES";
}

pub const DEFAULT_PORT: u16 = 3002;
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

// ==========================================
// ServerConfig - 服务配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: IpAddr,
    pub port: u16,
    /// 上传暂存目录（文件名为生成的 UUID）
    pub staging_dir: PathBuf,
    /// 归档根目录（其下为 json/ 和 csv/）
    pub archive_dir: PathBuf,
    /// 请求体大小上限（字节）
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::with_data_dir(DEFAULT_DATA_DIR)
    }
}

impl ServerConfig {
    /// 以指定数据根目录构造默认配置
    ///
    /// 暂存目录: `<data>/tmp`，归档目录: `<data>/public`
    pub fn with_data_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            staging_dir: data_dir.join("tmp"),
            archive_dir: data_dir.join("public"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// 从进程环境变量读取配置
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 从任意键值来源读取配置（便于测试，不触碰进程环境）
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let data_dir = get(config_keys::DATA_DIR).unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
        let mut config = Self::with_data_dir(&data_dir);

        if let Some(port) = get(config_keys::PORT).and_then(|v| v.parse::<u16>().ok()) {
            config.port = port;
        }
        if let Some(bind) = get(config_keys::BIND).and_then(|v| v.parse::<IpAddr>().ok()) {
            config.bind = bind;
        }
        if let Some(dir) = get(config_keys::STAGING_DIR) {
            config.staging_dir = PathBuf::from(dir);
        }
        if let Some(dir) = get(config_keys::ARCHIVE_DIR) {
            config.archive_dir = PathBuf::from(dir);
        }
        if let Some(limit) = get(config_keys::MAX_UPLOAD_BYTES).and_then(|v| v.parse::<usize>().ok())
        {
            config.max_upload_bytes = limit;
        }

        config
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    /// 某格式的归档目录
    pub fn archive_dir_for(&self, format: DocumentFormat) -> PathBuf {
        self.archive_dir.join(format.as_str())
    }

    /// 创建暂存目录和全部归档目录（幂等）
    pub async fn prepare_dirs(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.staging_dir).await?;
        for format in DocumentFormat::ALL {
            tokio::fs::create_dir_all(self.archive_dir_for(format)).await?;
        }
        Ok(())
    }
}
