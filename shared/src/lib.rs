pub mod entries_format;
pub mod gesture;
pub mod path;
pub mod payload;
pub mod recorder;
pub mod replay;
pub mod signature;
pub mod timeline;

pub use gesture::{GestureController, GestureState, GestureTick};
pub use payload::{SignatureEntry, SignaturePayload};
pub use recorder::StrokeRecorder;
pub use replay::{prepare_replay_data, ReplayFrame, ReplayTrack};
pub use signature::{sample_point, Point, Signature, Stroke};
pub use timeline::Timeline;
