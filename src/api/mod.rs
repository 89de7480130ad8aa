pub mod convert;
pub mod matching;
pub mod palette;
pub mod sample;

pub use convert::{handle_convert, ColorDto, ConvertQuery, __path_handle_convert};
pub use matching::{
    handle_match, handle_split, MatchDto, MatchRequest, MatchResponse, SplitRequest,
    SplitResponse, __path_handle_match, __path_handle_split,
};
pub use palette::{
    handle_palette, handle_palette_entry, handle_reload, PaletteResponse, ReloadResponse,
    SwatchDto, __path_handle_palette, __path_handle_palette_entry, __path_handle_reload,
};
pub use sample::{
    handle_sample, DragDto, PixelFormat, PointDto, RegionDto, SampleRequest, SampleResponse,
    __path_handle_sample,
};
