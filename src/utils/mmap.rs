use std::fs::File;
use std::io::Write;
use std::marker::PhantomData;
use std::path::Path;

use memmap2::Mmap;

use crate::types::error::SchedulerError;

// Fixed-size on-disk record. Encoding is explicit so the file format never
// depends on struct layout or padding.
pub trait Record: Sized {
    const SIZE: usize;

    fn write_to(&self, buf: &mut [u8]);
    fn read_from(buf: &[u8]) -> Self;
}

// Read-only typed view over a memory-mapped flat array of records.
pub struct MmapArray<T> {
    _file: File,
    mmap: Mmap,
    n_elements: usize,
    _marker: PhantomData<T>,
}

impl<T: Record> MmapArray<T> {
    pub fn open(path: &Path) -> Result<Self, SchedulerError> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };

        if mmap.len() % T::SIZE != 0 {
            return Err(SchedulerError::Generic(format!(
                "file length {} is not a multiple of the record size {}",
                mmap.len(),
                T::SIZE
            )));
        }

        let n_elements = mmap.len() / T::SIZE;
        Ok(Self {
            _file: file,
            mmap,
            n_elements,
            _marker: PhantomData,
        })
    }

    // Write a record file that `open` can map back.
    pub fn create(path: &Path, items: &[T]) -> Result<(), SchedulerError> {
        let mut buf = vec![0u8; items.len() * T::SIZE];
        for (item, chunk) in items.iter().zip(buf.chunks_exact_mut(T::SIZE)) {
            item.write_to(chunk);
        }

        let mut file = File::create(path)?;
        file.write_all(&buf)?;
        file.flush()?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.n_elements
    }

    pub fn is_empty(&self) -> bool {
        self.n_elements == 0
    }

    pub fn element_size(&self) -> usize {
        T::SIZE
    }

    pub fn get(&self, index: usize) -> Option<T> {
        if index >= self.n_elements {
            return None;
        }
        let start = index * T::SIZE;
        Some(T::read_from(&self.mmap[start..start + T::SIZE]))
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.mmap.chunks_exact(T::SIZE).map(T::read_from)
    }
}
