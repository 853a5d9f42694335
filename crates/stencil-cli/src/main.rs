use std::rc::Rc;

use stencil_core::impls::{FrameQueue, InMemoryDocument};
use stencil_core::{
    Component, ComponentError, ComponentInstance, Hooks, Host, Node, StencilConfig,
};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// 1 行分のカウンタ
struct Counter {
    label: &'static str,
    count: u32,
}

impl Component for Counter {
    type Args = u32;

    fn create_element(&mut self, count: &u32) -> Result<Node, ComponentError> {
        self.count = *count;
        Ok(Node::element("li").with_child(Node::text(format!("{}: {}", self.label, count))))
    }

    fn update(&mut self, count: &u32) -> Result<bool, ComponentError> {
        Ok(self.count != *count)
    }

    fn hooks(&self) -> Hooks {
        Hooks::LOAD | Hooks::UNLOAD
    }

    fn load(&mut self) {
        info!(label = self.label, count = self.count, "counter loaded");
    }

    fn unload(&mut self) {
        info!(label = self.label, "counter unloaded");
    }
}

/// (カウンタ番号, 値) の並びで描画するボード
struct Board {
    counters: Vec<ComponentInstance<Counter>>,
}

impl Component for Board {
    type Args = [(usize, u32)];

    fn create_element(&mut self, rows: &[(usize, u32)]) -> Result<Node, ComponentError> {
        let list = Node::element("ul").with_attr("class", "board");
        for (index, count) in rows {
            let Some(counter) = self.counters.get(*index) else {
                warn!(index, "no such counter");
                continue;
            };
            list.append_child(&counter.render(count)?)
                .map_err(|err| ComponentError::Component(err.to_string()))?;
        }
        Ok(list)
    }

    fn update(&mut self, _rows: &[(usize, u32)]) -> Result<bool, ComponentError> {
        Ok(true)
    }
}

fn init_logging(config: &StencilConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    fmt().with_env_filter(filter).init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // (A) 設定の読み込み（STENCIL_CONFIG が無ければデフォルト）
    let (config, config_error) = match std::env::var("STENCIL_CONFIG") {
        Ok(path) => match StencilConfig::from_path(&path) {
            Ok(config) => (config, None),
            Err(err) => (StencilConfig::default(), Some(err)),
        },
        Err(_) => (StencilConfig::default(), None),
    };
    init_logging(&config);
    if let Some(err) = config_error {
        warn!(error = %err, "falling back to the default config");
    }

    // (B) in-memory の host を用意
    let document = Rc::new(InMemoryDocument::new());
    let frames = Rc::new(FrameQueue::new());
    let host = Host::in_memory(&document, &frames);

    let counters = ["apples", "pears", "plums"]
        .into_iter()
        .map(|label| ComponentInstance::new(Counter { label, count: 0 }, host.clone()))
        .collect();
    let board = ComponentInstance::new(Board { counters }, host.clone());

    // (C) フレームごとの描画内容: 更新 → 並び替え → 削除 → 復帰
    let steps: Vec<Vec<(usize, u32)>> = vec![
        vec![(0, 0), (1, 0), (2, 0)],
        vec![(0, 1), (1, 0), (2, 0)],
        vec![(2, 0), (0, 1), (1, 0)],
        vec![(2, 0), (0, 2)],
        vec![(2, 1), (0, 2), (1, 5)],
    ];

    // (D) フレームループ
    let mut ticker = tokio::time::interval(config.frame_interval());
    for frame in 0..config.frames as usize {
        ticker.tick().await;
        if let Some(rows) = steps.get(frame) {
            let node = board.render(rows)?;
            if !node.is_placeholder() {
                document.append_child(&document.body(), &node)?;
            }
            info!(frame, rows = ?rows, "rendered");
        }
        document.flush_mutations();
        frames.run_frame();
    }

    // (E) 最終的なツリーを出力
    println!(
        "{}",
        serde_json::to_string_pretty(&document.body().snapshot())?
    );
    Ok(())
}
