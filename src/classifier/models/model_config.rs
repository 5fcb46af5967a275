/// Descriptor locations for one model: the topology (ONNX graph) and the
/// metadata (JSON label list). Either may be an http(s) URL or a local path.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub topology_location: String,
    pub metadata_location: String,
    /// (height, width) the model expects.
    pub input_shape: (u32, u32),
}
