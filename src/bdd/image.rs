//! Binary image serialization for BDDs
//!
//! The on-disk format preserves variable identities so a reloaded dictionary
//! keeps the exact variable-index layout it was built with. Layout:
//!
//! ```text
//! magic    b"LXBD"
//! version  u32 LE
//! vars     u32 LE   one past the highest allocated variable index
//! nodes    u32 LE   number of decision-node records
//! root     u32 LE   file id of the root (0 = FALSE, 1 = TRUE, 2.. = records)
//! records  nodes * (var u32, low u32, high u32), children before parents
//! ```
//!
//! Records are emitted bottom-up, so the reader can rebuild each node through
//! the unique table as soon as its record arrives and the result is canonical
//! by construction.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use super::{Bdd, BddManager, BddNode, NodeId, FALSE_NODE, TRUE_NODE};
use crate::error::{ImageError, ImageReadError, ImageWriteError};

const MAGIC: [u8; 4] = *b"LXBD";
const VERSION: u32 = 1;

pub(crate) fn write_u32<W: Write>(writer: &mut W, value: u32) -> io::Result<()> {
    writer.write_all(&value.to_le_bytes())
}

pub(crate) fn read_u32<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

impl Bdd {
    /// Serialize this BDD to a binary image
    pub fn write_image<W: Write>(&self, writer: &mut W) -> Result<(), ImageWriteError> {
        let inner = self.manager().inner.read().unwrap();

        // Reachable decision nodes in ascending id order. The store is
        // append-only with children created before parents, so ascending id
        // order is also bottom-up order.
        let mut reachable = Vec::new();
        {
            let mut visited = vec![false; inner.nodes.len()];
            let mut stack = vec![self.root];
            while let Some(id) = stack.pop() {
                if visited[id] {
                    continue;
                }
                visited[id] = true;
                if let BddNode::Decision { low, high, .. } = inner.nodes[id] {
                    reachable.push(id);
                    stack.push(low);
                    stack.push(high);
                }
            }
        }
        reachable.sort_unstable();

        // Manager node id -> file id
        let mut file_ids = vec![0u32; inner.nodes.len()];
        file_ids[FALSE_NODE] = 0;
        file_ids[TRUE_NODE] = 1;
        for (record, &id) in reachable.iter().enumerate() {
            file_ids[id] = record as u32 + 2;
        }

        writer.write_all(&MAGIC)?;
        write_u32(writer, VERSION)?;
        write_u32(writer, inner.num_vars as u32)?;
        write_u32(writer, reachable.len() as u32)?;
        write_u32(writer, file_ids[self.root])?;

        for &id in &reachable {
            match inner.nodes[id] {
                BddNode::Decision { var, low, high } => {
                    write_u32(writer, var as u32)?;
                    write_u32(writer, file_ids[low])?;
                    write_u32(writer, file_ids[high])?;
                }
                BddNode::Terminal(_) => unreachable!("terminals are never recorded"),
            }
        }

        Ok(())
    }

    /// Serialize this BDD to a binary image file
    pub fn to_image_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ImageWriteError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_image(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

impl BddManager {
    /// Reconstruct a BDD from a binary image
    ///
    /// Nodes are re-created through the unique table, so loading into a
    /// manager that already holds other functions shares structure with them.
    /// The manager's variable count grows to cover the image's variables.
    pub fn read_image<R: Read>(&self, reader: &mut R) -> Result<Bdd, ImageReadError> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(ImageError::BadMagic { found: magic }.into());
        }

        let version = read_u32(reader)?;
        if version != VERSION {
            return Err(ImageError::UnsupportedVersion { version }.into());
        }

        let num_vars = read_u32(reader)?;
        let num_nodes = read_u32(reader)? as usize;
        let root = read_u32(reader)?;

        let mut inner = self.inner.write().unwrap();
        if num_vars as usize > inner.num_vars {
            inner.num_vars = num_vars as usize;
        }

        // File id -> manager node id, extended record by record
        let mut node_ids: Vec<NodeId> = Vec::with_capacity(num_nodes + 2);
        node_ids.push(FALSE_NODE);
        node_ids.push(TRUE_NODE);

        for record in 0..num_nodes {
            let var = read_u32(reader)?;
            let low = read_u32(reader)?;
            let high = read_u32(reader)?;

            if var >= num_vars {
                return Err(ImageError::VariableOutOfRange {
                    record,
                    variable: var,
                }
                .into());
            }
            let resolve = |child: u32| -> Result<NodeId, ImageError> {
                node_ids
                    .get(child as usize)
                    .copied()
                    .ok_or(ImageError::DanglingNode { record, child })
            };
            let low = resolve(low)?;
            let high = resolve(high)?;
            node_ids.push(inner.make_node(var as usize, low, high));
        }

        let root = *node_ids
            .get(root as usize)
            .ok_or(ImageError::DanglingNode {
                record: num_nodes,
                child: root,
            })?;
        drop(inner);

        Ok(Bdd {
            manager: self.clone(),
            root,
        })
    }

    /// Reconstruct a BDD from a binary image file
    pub fn read_image_file<P: AsRef<Path>>(&self, path: P) -> Result<Bdd, ImageReadError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        self.read_image(&mut reader)
    }
}
