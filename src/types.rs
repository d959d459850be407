use crate::events::ChangeEvent;

pub type ChangeSender = async_channel::Sender<ChangeEvent>;
pub type ChangeReceiver = async_channel::Receiver<ChangeEvent>;
