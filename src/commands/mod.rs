pub type CmdResult<T> = csvrename::Result<(T, i32)>;

pub mod rename;
