use std::{path::PathBuf, sync::mpsc::Sender};

use tracing::info;

use crate::{
    disk::{LocalHostFs, MetadataFile, MetadataHeader},
    fs::{config::CapacityPlan, error::Result, VirtualFs},
};

/// 启动后 shell 持有的全部状态
#[derive(Debug)]
pub struct Session {
    pub fs: VirtualFs,
    pub host: LocalHostFs,
    pub metadata: MetadataFile,
    pub header: MetadataHeader,
}

/// 初始化线程发给 shell 的进度消息
#[derive(Debug)]
pub enum BootProgress {
    Step(&'static str),
    Progress(u64),
    Finished(Result<Session>),
}

#[derive(Debug, Clone)]
pub struct BootConfig {
    pub host_root: PathBuf,
    pub metadata_path: PathBuf,
}

// 接收端提前退出时进度消息直接丢弃
pub fn perform_disk_initialization(tx: Sender<BootProgress>, config: BootConfig) {
    let result = initialize(&tx, config);
    let _ = tx.send(BootProgress::Finished(result));
}

fn initialize(tx: &Sender<BootProgress>, config: BootConfig) -> Result<Session> {
    let plan = CapacityPlan::standard();

    let _ = tx.send(BootProgress::Step("📒 Checking metadata file..."));
    let metadata = MetadataFile::new(config.metadata_path);
    let header = metadata.open_or_create(plan)?;
    let _ = tx.send(BootProgress::Progress(30));

    let _ = tx.send(BootProgress::Step("🧠 Allocating virtual disk..."));
    let fs = VirtualFs::with_plan(plan);
    let _ = tx.send(BootProgress::Progress(90));

    let _ = tx.send(BootProgress::Step("🔗 Attaching host file system..."));
    let host = LocalHostFs::new(config.host_root);
    let _ = tx.send(BootProgress::Progress(100));

    info!(
        volume_id = %header.volume_id,
        data_size = plan.data_size,
        host_root = %host.root().display(),
        "virtual disk ready"
    );

    Ok(Session {
        fs,
        host,
        metadata,
        header,
    })
}
