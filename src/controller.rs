//! 識別フローの状態コントローラ
//!
//! idle → analyzing → success | error の状態機械。
//! 状態はこのインスタンスだけが書き換え、遷移は broadcast で通知する。
//! `analyze` は `&mut self` を取るため、解析の二重起動は型で防がれる。

use crate::error::{PlantIdError, Result};
use crate::identifier::PlantIdentifier;
use crate::upload::UploadedFile;
use log::debug;
use plant_id_common::{IdentificationResult, IdentifyError, ValidationError};
use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisState {
    Idle,
    Analyzing,
    Success,
    Error,
}

impl AnalysisState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisState::Idle => "idle",
            AnalysisState::Analyzing => "analyzing",
            AnalysisState::Success => "success",
            AnalysisState::Error => "error",
        }
    }
}

impl std::fmt::Display for AnalysisState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 状態遷移イベント
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    pub from: AnalysisState,
    pub to: AnalysisState,
}

/// 描画すべきビュー
#[derive(Debug, PartialEq)]
pub enum View<'a> {
    /// アップロード画面（解析中フラグ・エラーバナー付き）
    Uploader {
        file_name: Option<&'a str>,
        loading: bool,
        error: Option<&'a IdentifyError>,
    },
    /// 結果画面（プレビューは画像を表示できるフロントエンド向け。端末表示では使わない）
    Result {
        result: &'a IdentificationResult,
        preview: Option<&'a str>,
    },
}

pub struct Controller<I> {
    identifier: I,
    state: AnalysisState,
    selected: Option<UploadedFile>,
    preview: Option<String>,
    result: Option<IdentificationResult>,
    error: Option<IdentifyError>,
    events: broadcast::Sender<StateChange>,
}

impl<I: PlantIdentifier> Controller<I> {
    pub fn new(identifier: I) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            identifier,
            state: AnalysisState::Idle,
            selected: None,
            preview: None,
            result: None,
            error: None,
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.events.subscribe()
    }

    pub fn state(&self) -> AnalysisState {
        self.state
    }

    pub fn selected_file(&self) -> Option<&UploadedFile> {
        self.selected.as_ref()
    }

    pub fn result(&self) -> Option<&IdentificationResult> {
        self.result.as_ref()
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn error(&self) -> Option<&IdentifyError> {
        self.error.as_ref()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }

    /// 画像を選択
    ///
    /// 検証に失敗した場合は状態も選択中の画像も変えない。
    /// エラー表示中に選び直すと idle に戻る。
    pub fn select_file(&mut self, file: UploadedFile) -> Result<()> {
        if matches!(self.state, AnalysisState::Analyzing | AnalysisState::Success) {
            return Err(self.invalid("画像の選択"));
        }

        file.validate().map_err(|e: ValidationError| {
            debug!("検証エラー: {} ({})", file.file_name, e);
            e
        })?;

        if self.state == AnalysisState::Error {
            self.error = None;
            self.transition(AnalysisState::Idle);
        }
        self.selected = Some(file);
        Ok(())
    }

    /// 選択中の画像を解析
    ///
    /// エラー表示中に呼ぶと、エラーを閉じて同じ画像で再解析する。
    pub async fn analyze(&mut self) -> AnalysisState {
        if self.state == AnalysisState::Error {
            self.dismiss_error();
        }
        if self.state != AnalysisState::Idle || self.selected.is_none() {
            return self.state;
        }

        self.error = None;
        self.transition(AnalysisState::Analyzing);

        // 本体の読み込みはここで1回だけ。送信とプレビューは同じバイト列を使う
        let loaded = match self.selected.as_ref() {
            Some(file) => file.load().await,
            None => return self.state,
        };
        let file = match loaded {
            Ok(file) => file,
            Err(e) => return self.fail(e),
        };

        match self.identifier.identify(&file).await {
            Ok(result) => {
                self.preview = file.preview_data_url();
                self.result = Some(result);
                self.transition(AnalysisState::Success);
                self.state
            }
            Err(e) => self.fail(e),
        }
    }

    fn fail(&mut self, error: IdentifyError) -> AnalysisState {
        self.error = Some(error);
        self.transition(AnalysisState::Error);
        self.state
    }

    /// 解析可能か（選択済みかつ idle / error）
    pub fn can_analyze(&self) -> bool {
        self.selected.is_some()
            && matches!(self.state, AnalysisState::Idle | AnalysisState::Error)
    }

    /// 初期状態に戻す（選択・結果・プレビュー・エラーを破棄）
    pub fn reset(&mut self) {
        self.selected = None;
        self.preview = None;
        self.result = None;
        self.error = None;
        self.transition(AnalysisState::Idle);
    }

    /// エラーを閉じる（選択中の画像は保持）
    pub fn dismiss_error(&mut self) {
        if self.state == AnalysisState::Error {
            self.error = None;
            self.transition(AnalysisState::Idle);
        }
    }

    pub fn view(&self) -> View<'_> {
        match (&self.state, &self.result) {
            (AnalysisState::Success, Some(result)) => View::Result {
                result,
                preview: self.preview.as_deref(),
            },
            _ => View::Uploader {
                file_name: self.selected.as_ref().map(|f| f.file_name.as_str()),
                loading: self.state == AnalysisState::Analyzing,
                error: self.error.as_ref(),
            },
        }
    }

    fn transition(&mut self, to: AnalysisState) {
        let from = self.state;
        if from == to {
            return;
        }
        self.state = to;
        debug!("状態遷移: {} → {}", from, to);
        // 購読者がいなければ送信エラーになるが無視してよい
        let _ = self.events.send(StateChange { from, to });
    }

    fn invalid(&self, action: &str) -> PlantIdError {
        PlantIdError::InvalidOperation(format!("{}は{}状態では行えません", action, self.state))
    }
}
