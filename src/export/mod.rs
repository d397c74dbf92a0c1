//! Reading panoramas and writing unwrapped nets and faces as PNG files.

mod png;

pub use png::{
    export_face_pngs,
    export_net_png,
    face_file_name,
    load_source,
    write_png,
    ImageIoError,
    PngExportOptions,
};
