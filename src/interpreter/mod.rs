pub mod ast_interpreter;

use std::io::{self, ErrorKind, Read, Write};

use thiserror::Error;

pub const DEFAULT_TAPE_SIZE: usize = 30_000;

/// What `,` does once the input stream has run dry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum EofBehavior {
    /// Store 0 in the cell
    #[default]
    Zero,
    /// Leave the cell as it was
    Unchanged,
    /// Stop the program with `RuntimeError::EndOfInput`
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub tape_size: usize,
    pub eof: EofBehavior,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tape_size: DEFAULT_TAPE_SIZE,
            eof: EofBehavior::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Data pointer {pointer} moved by {offset} leaves the tape (size {tape_size})")]
    TapeBoundsExceeded {
        pointer: usize,
        offset: isize,
        tape_size: usize,
    },

    #[error("Tried to read past the end of input")]
    EndOfInput,

    #[error("IO Error: {0}")]
    Io(
        #[from]
        io::Error,
    ),
}

pub struct Runtime<R: Read, W: Write> {
    /// Pointer into the heap
    data_pointer: usize,

    /// Our statically allocated heap
    heap: Vec<u8>,

    eof: EofBehavior,

    in_stream: R,
    out_stream: W,
}

impl<R: Read, W: Write> Runtime<R, W> {
    pub fn new(config: RuntimeConfig, in_stream: R, out_stream: W) -> Self {
        Self {
            data_pointer: 0,
            heap: vec![0; config.tape_size.max(1)],
            eof: config.eof,
            in_stream,
            out_stream,
        }
    }

    pub fn reset(&mut self) {
        self.heap.fill(0);
        self.data_pointer = 0;
    }

    /// Read `len` bytes from stream in runtime into the data pointer, the last one wins
    pub fn read(&mut self, len: usize) -> Result<(), RuntimeError> {
        for _ in 0..len {
            let mut byte = [0u8; 1];
            match self.in_stream.read_exact(&mut byte) {
                Ok(()) => self.heap[self.data_pointer] = byte[0],
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => match self.eof {
                    EofBehavior::Zero => self.heap[self.data_pointer] = 0,
                    EofBehavior::Unchanged => {}
                    EofBehavior::Error => return Err(RuntimeError::EndOfInput),
                },
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Write the byte at the data pointer `len` times to the stream in runtime
    pub fn write(&mut self, len: usize) -> Result<(), RuntimeError> {
        let byte = self.heap[self.data_pointer];
        self.out_stream.write_all(&vec![byte; len])?;
        Ok(())
    }

    pub fn deref_and_add_value(&mut self, by: usize) {
        // only the low byte matters once we wrap
        self.heap[self.data_pointer] = self.heap[self.data_pointer].wrapping_add(by as u8);
    }

    pub fn deref_and_sub_value(&mut self, by: usize) {
        self.heap[self.data_pointer] = self.heap[self.data_pointer].wrapping_sub(by as u8);
    }

    pub fn clear_value(&mut self) {
        self.heap[self.data_pointer] = 0;
    }

    pub fn shift_data_pointer(&mut self, by: isize) -> Result<(), RuntimeError> {
        match self.data_pointer.checked_add_signed(by) {
            Some(pointer) if pointer < self.heap.len() => {
                self.data_pointer = pointer;
                Ok(())
            }
            _ => Err(RuntimeError::TapeBoundsExceeded {
                pointer: self.data_pointer,
                offset: by,
                tape_size: self.heap.len(),
            }),
        }
    }

    /// is the value at the data pointer zero?
    pub fn value_is_zero(&self) -> bool {
        self.heap[self.data_pointer] == 0
    }

    pub fn data_pointer(&self) -> usize {
        self.data_pointer
    }

    pub fn tape(&self) -> &[u8] {
        &self.heap
    }

    pub fn flush(&mut self) -> Result<(), RuntimeError> {
        self.out_stream.flush()?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.out_stream
    }
}
