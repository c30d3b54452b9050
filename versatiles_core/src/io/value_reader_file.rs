//! This module provides the `ValueReaderFile` struct for reading values from a file.
//!
//! # Overview
//!
//! The `ValueReaderFile` struct allows for reading various data types from a file using
//! either little-endian or big-endian byte order. It implements the `ValueReader` trait to provide
//! methods for reading integers, floating-point numbers, and other types of data from the file. The
//! module also provides methods for managing the read position and creating sub-readers limited to
//! a byte window within the file.
//!
//! # Examples
//!
//! ```rust
//! use versatiles_core::io::{ValueReader, ValueReaderFile};
//! use anyhow::Result;
//! use std::fs::File;
//!
//! fn main() -> Result<()> {
//!     let path = std::env::temp_dir().join("temp3.txt");
//!     std::fs::write(&path, [0x01, 0x02, 0x03, 0x04])?;
//!     let file = File::open(&path)?;
//!     let mut reader = ValueReaderFile::new_le(file)?;
//!     assert_eq!(reader.read_u16()?, 0x0201);
//!     Ok(())
//! }
//! ```

#![allow(dead_code)]

use super::{SeekRead, ValueReader};
use anyhow::{Result, bail};
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::fs::File;
use std::io::{Seek, SeekFrom};
use std::marker::PhantomData;

/// A struct that provides reading capabilities from a file using a specified byte order.
///
/// The reader's window runs from the file's current position at construction up to `end`
/// (an absolute file offset), so a sub-reader can be carved out of a larger file without
/// copying its contents.
pub struct ValueReaderFile<E: ByteOrder> {
	_phantom: PhantomData<E>,
	file: File,
	end: u64,
}

impl<E: ByteOrder> ValueReaderFile<E> {
	/// Creates a new `ValueReaderFile` instance from a `File`, windowed to its full length.
	pub fn new(file: File) -> Result<ValueReaderFile<E>> {
		let end = file.metadata()?.len();
		Ok(ValueReaderFile {
			_phantom: PhantomData,
			file,
			end,
		})
	}
}

impl ValueReaderFile<LittleEndian> {
	/// Creates a new `ValueReaderFile` instance with little-endian byte order from a `File`.
	pub fn new_le(file: File) -> Result<ValueReaderFile<LittleEndian>> {
		ValueReaderFile::new(file)
	}
}

impl ValueReaderFile<BigEndian> {
	/// Creates a new `ValueReaderFile` instance with big-endian byte order from a `File`.
	pub fn new_be(file: File) -> Result<ValueReaderFile<BigEndian>> {
		ValueReaderFile::new(file)
	}
}

impl SeekRead for File {}

impl<'a, E: ByteOrder + 'a> ValueReader<'a, E> for ValueReaderFile<E> {
	fn get_reader(&mut self) -> &mut dyn SeekRead {
		&mut self.file
	}

	fn len(&self) -> u64 {
		self.end
	}

	fn position(&mut self) -> u64 {
		self.file.stream_position().unwrap_or(0)
	}

	fn set_position(&mut self, position: u64) -> Result<()> {
		if position > self.end {
			bail!("set position outside length")
		}
		self.file.seek(SeekFrom::Start(position))?;
		Ok(())
	}

	fn get_sub_reader<'b>(&'b mut self, length: u64) -> Result<Box<dyn ValueReader<'b, E> + 'b>>
	where
		E: 'b,
	{
		let start = self.file.stream_position()?;
		let end = start + length;
		if end > self.end {
			bail!("Requested sub-reader length exceeds remaining data");
		}

		self.file.seek(SeekFrom::Start(end))?;

		let mut sub_file = self.file.try_clone()?;
		sub_file.seek(SeekFrom::Start(start))?;

		Ok(Box::new(ValueReaderFile {
			_phantom: PhantomData,
			file: sub_file,
			end,
		}))
	}
}
