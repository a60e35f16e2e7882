// Module naming follows project convention (SPSC = Single-Producer Single-Consumer)
#[allow(non_snake_case)]
pub mod SPSC {
    pub mod Buffer {
        pub mod Buffer;
        pub mod Buffer_impl;
        pub mod layout;
        pub use Buffer::{PowerOfTwo, RingBuffer}; // re-export for stable path
    }
    pub mod Structs {
        pub mod Descriptor_Structs;
        pub use Descriptor_Structs::{PacketDescriptor, TX_FLAG_ACK_REQUIRED}; // re-export for stable path
    }

    mod builder;
    mod consumer;
    pub mod doorbell;
    mod producer;

    pub use builder::{RingBuilder, DEFAULT_CAPACITY};
    pub use consumer::Consumer;
    pub use doorbell::{Doorbell, NoDoorbell};
    pub use producer::Producer;
}

#[allow(non_snake_case)]
mod Debug {
    pub mod StructDebug;
}

pub mod error;
pub mod ffi;

pub use error::ConfigError;
pub use SPSC::Buffer::{PowerOfTwo, RingBuffer};
pub use SPSC::Structs::PacketDescriptor;
pub use SPSC::{Consumer, Producer, RingBuilder};
