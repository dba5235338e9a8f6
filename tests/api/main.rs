mod health_check;
mod home;
mod waitlist;
