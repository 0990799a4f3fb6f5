mod disk;

pub use disk::DiskPhotoStorage;
