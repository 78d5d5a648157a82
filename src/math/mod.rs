pub mod dotv;
