pub mod decoded_image;
pub mod normalize;
pub mod tensor;
