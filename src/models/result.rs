use bytes::Bytes;

/// 远程操作成功后的结果，交给 ResultSink 后即丢弃
#[derive(Debug, Clone)]
pub struct RemoteResult {
    pub payload: Bytes,
    pub suggested_name: String,
}

impl RemoteResult {
    pub fn new(payload: Bytes, suggested_name: impl Into<String>) -> Self {
        Self {
            payload,
            suggested_name: suggested_name.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}
