mod xchacha_page_token_codec;

pub use xchacha_page_token_codec::XChaChaPageTokenCodec;
