mod object;
mod store;

pub use object::{
    ARROW_HEAD_LENGTH, DrawObject, ERASER_HIT_RADIUS, TEXT_HIT_HALF_HEIGHT, TEXT_HIT_HALF_WIDTH,
};
pub use store::{DrawLayer, DrawStore, LayerId};
