use std::path::Path;

use windows as Windows;
use Windows::core::{IUnknown, Interface, GUID};
use Windows::Win32::Media::Speech::{ISpStream, SpStream, SPFM_CREATE_ALWAYS};
use Windows::Win32::System::Com::{CoCreateInstance, CLSCTX_ALL};

use crate::Result;

use super::AudioFormat;

#[allow(non_upper_case_globals)]
const SPDFID_WaveFormatEx: GUID = GUID::from_u128(0xc31adbae_527f_4ff5_a230_f62bb61ff70c);

/// A SAPI stream bound to a wave file. The file is complete once the stream is closed.
pub(crate) struct WaveFileStream {
    intf: ISpStream,
}

impl WaveFileStream {
    pub fn create<P: AsRef<Path>>(path: P, format: &AudioFormat) -> Result<Self> {
        let intf: ISpStream = unsafe { CoCreateInstance(&SpStream, None, CLSCTX_ALL) }?;
        unsafe {
            intf.BindToFile(
                path.as_ref().as_os_str(),
                SPFM_CREATE_ALWAYS,
                &SPDFID_WaveFormatEx,
                &format.to_sapi(),
                0,
            )
        }?;
        Ok(Self {
            intf,
        })
    }

    pub fn to_sapi(&self) -> Result<IUnknown> {
        Ok(self.intf.cast()?)
    }

    pub fn close(&self) -> Result<()> {
        Ok(unsafe { self.intf.Close() }?)
    }
}
