pub const IMAGE_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "gif", "webp"];

pub mod uploads {

    pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

    pub const MAX_FILES: usize = 10;

    /// Multipart field carrying image files.
    pub const FIELD_NAME: &str = "images";

    /// URL prefix uploaded files are served under.
    pub const URL_PREFIX: &str = "/uploads";
}

pub mod listings {

    pub const FEATURED_LIMIT: u64 = 3;
}

pub mod consultation {

    pub const DEFAULT_TYPE: &str = "General Consultation";

    pub const VIEWING_TYPE: &str = "Property Viewing";

    pub const PHONE_NOT_PROVIDED: &str = "Not provided";
}

pub mod admin {

    pub const DEFAULT_EMAIL: &str = "admin@gmail.com";

    pub const DEFAULT_PASSWORD: &str = "123456";
}
